pub mod aliases;
pub mod checklist;
pub mod compat;
pub mod resolver;
pub mod signatures;

use crate::core::{Complexity, SupportTier};
use serde::{Deserialize, Serialize};

/// Confidence tier of one signature match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchConfidence {
    Low,
    Medium,
    High,
}

/// One capability-usage signature match, canonicalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginHit {
    pub canonical_id: String,
    pub line: usize,
    pub matched: String,
    pub confidence: MatchConfidence,
}

/// Resolved compatibility judgment for one canonical capability id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginVerdict {
    pub id: String,
    pub tier: SupportTier,
    pub gitlab_equivalent: Option<String>,
    pub include_ref: Option<String>,
    pub note: String,
    pub doc_url: Option<String>,
    pub alternative: Option<String>,
    /// Contributing hits, sorted by first-occurrence line. Never empty.
    pub hits: Vec<PluginHit>,
    pub complexity: Complexity,
}

impl PluginVerdict {
    pub fn first_line(&self) -> usize {
        self.hits.first().map(|h| h.line).unwrap_or(0)
    }

    pub fn confidence(&self) -> f64 {
        self.tier.confidence()
    }
}

/// Aggregated verdict counts plus the weighted readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MigrationSummary {
    pub total: usize,
    pub native: usize,
    pub templated: usize,
    pub limited: usize,
    pub unsupported: usize,
    pub score: u32,
}
