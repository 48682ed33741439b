use crate::config::TranslationConfig;
use crate::core::{Extraction, SupportTier};
use crate::credentials::{self, ResolveOptions, ValidationReport, VariableSpec};
use crate::enrich::{Enrichment, EnrichmentProvider};
use crate::extract;
use crate::plugins::{self, compat::CompatibilityTable, MigrationSummary, PluginVerdict};
use crate::store::{AuditEvent, ScanStore};
use crate::synth;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Everything one translation run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationOutcome {
    pub config_text: String,
    pub checklist: String,
    pub extraction: Extraction,
    pub verdicts: Vec<PluginVerdict>,
    pub specs: Vec<VariableSpec>,
    pub summary: MigrationSummary,
    pub validation: ValidationReport,
    pub env_template: String,
    pub provisioning_script: String,
}

/// The translation engine: injected immutable tables plus optional
/// collaborators. Holds no per-run state, so one engine may serve
/// concurrent translations without coordination.
pub struct TranslationEngine {
    config: TranslationConfig,
    compat: CompatibilityTable,
    enrichment: Option<Box<dyn EnrichmentProvider>>,
    store: Option<Box<dyn ScanStore>>,
}

impl TranslationEngine {
    pub fn new(config: TranslationConfig) -> Self {
        TranslationEngine {
            config,
            compat: CompatibilityTable::builtin(),
            enrichment: None,
            store: None,
        }
    }

    pub fn with_compat_table(mut self, compat: CompatibilityTable) -> Self {
        self.compat = compat;
        self
    }

    pub fn with_enrichment(mut self, provider: Box<dyn EnrichmentProvider>) -> Self {
        self.enrichment = Some(provider);
        self
    }

    pub fn with_store(mut self, store: Box<dyn ScanStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Runs one translation: the three scanners execute concurrently over
    /// the same immutable input, synthesis waits on all three. Pure and
    /// CPU-bound; total over its input.
    pub fn translate(&self, script: &str) -> TranslationOutcome {
        let (extraction, (plugin_hits, credential_hits)) = rayon::join(
            || extract::extract(script),
            || {
                rayon::join(
                    || plugins::resolver::scan(script),
                    || credentials::scanner::scan(script),
                )
            },
        );

        let mut verdicts = plugins::resolver::resolve(&self.compat, &plugin_hits);
        self.enrich_unsupported(script, &mut verdicts);

        let options = ResolveOptions {
            protected: self.config.protected_variables,
            scope: self.config.variable_scope.clone(),
        };
        let specs = credentials::classify::resolve(&credential_hits, &options);

        let summary = plugins::resolver::summarize(&verdicts);
        let validation = credentials::validate::validate(&specs);
        let config_text = synth::synthesize(
            &extraction,
            &verdicts,
            &specs,
            self.config.tier,
            self.config.review_threshold,
        );
        let checklist = plugins::checklist::render_checklist(&verdicts);
        let env_template = synth::artifacts::env_file_template(&specs);
        let provisioning_script = synth::artifacts::provisioning_script(&specs);

        let outcome = TranslationOutcome {
            config_text,
            checklist,
            extraction,
            verdicts,
            specs,
            summary,
            validation,
            env_template,
            provisioning_script,
        };

        self.persist(&outcome);
        outcome
    }

    /// Consults the enrichment collaborator for unsupported verdicts,
    /// substituting the fixed conservative fallback on any error. A failing
    /// collaborator never fails the run.
    fn enrich_unsupported(&self, script: &str, verdicts: &mut [PluginVerdict]) {
        let Some(provider) = &self.enrichment else {
            return;
        };
        for verdict in verdicts
            .iter_mut()
            .filter(|v| v.tier == SupportTier::Unsupported)
        {
            let usage = verdict
                .hits
                .first()
                .map(|h| h.matched.clone())
                .unwrap_or_default();
            let enrichment = match provider.analyze(&verdict.id, &usage, script) {
                Ok(e) => e,
                Err(err) => {
                    log::warn!("enrichment failed for '{}': {err}", verdict.id);
                    Enrichment::fallback()
                }
            };
            if verdict.gitlab_equivalent.is_none() {
                verdict.gitlab_equivalent = enrichment.equivalent;
            }
            if verdict.doc_url.is_none() {
                verdict.doc_url = enrichment.doc_url;
            }
            if !enrichment.note.is_empty() {
                verdict.note = format!("{} ({})", verdict.note, enrichment.note);
            }
        }
    }

    /// Best-effort persistence: failures are logged and swallowed.
    fn persist(&self, outcome: &TranslationOutcome) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(err) = store.record(outcome) {
            log::warn!("failed to persist translation outcome: {err}");
        }
        let event = AuditEvent {
            at: Utc::now(),
            action: "translate".to_string(),
            detail: format!(
                "score={} capabilities={} variables={}",
                outcome.summary.score,
                outcome.summary.total,
                outcome.specs.len()
            ),
        };
        if let Err(err) = store.audit(&event) {
            log::warn!("failed to persist audit event: {err}");
        }
    }
}
