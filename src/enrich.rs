use serde::{Deserialize, Serialize};

/// Outcome of one enrichment lookup for an unsupported capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    pub status: EnrichmentStatus,
    pub equivalent: Option<String>,
    pub note: String,
    pub blocking: bool,
    pub workaround_available: bool,
    pub doc_url: Option<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStatus {
    Supported,
    Partial,
    Unsupported,
}

impl Enrichment {
    /// Fixed conservative fallback used whenever the collaborator is
    /// absent, times out or errors. Correctness never depends on the
    /// collaborator responding.
    pub fn fallback() -> Self {
        Enrichment {
            status: EnrichmentStatus::Partial,
            equivalent: None,
            note: "no enrichment available; verify manually".to_string(),
            blocking: false,
            workaround_available: false,
            doc_url: None,
            confidence: 0.6,
        }
    }
}

/// Optional external collaborator consulted for natural-language notes on
/// capabilities the static table cannot judge.
pub trait EnrichmentProvider: Send + Sync {
    fn analyze(
        &self,
        capability_id: &str,
        usage_context: &str,
        project_context: &str,
    ) -> anyhow::Result<Enrichment>;
}
