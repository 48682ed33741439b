// Export modules for library usage
pub mod cli;
pub mod config;
pub mod core;
pub mod credentials;
pub mod engine;
pub mod enrich;
pub mod extract;
pub mod plugins;
pub mod store;
pub mod synth;

// Re-export commonly used types
pub use crate::config::TranslationConfig;
pub use crate::core::{
    BindingKind, Complexity, ComplexityTier, CredentialBinding, Extraction, FeatureSet,
    MatrixAxis, Parameter, ParamKind, PostAction, RetentionPolicy, SupportTier, TimeUnit, Timeout,
    UnparsedRegion,
};
pub use crate::credentials::{
    classify::{classify, resolve as resolve_credentials},
    scanner::scan as scan_credentials,
    validate::validate as validate_specs,
    CredentialHit, ResolveOptions, SecretClass, ValidationReport, ValueKind, VariableSpec,
};
pub use crate::engine::{TranslationEngine, TranslationOutcome};
pub use crate::enrich::{Enrichment, EnrichmentProvider, EnrichmentStatus};
pub use crate::extract::extract;
pub use crate::plugins::{
    checklist::render_checklist,
    compat::{CompatEntry, CompatibilityTable},
    resolver::{readiness_score, resolve as resolve_plugins, scan as scan_plugins, summarize},
    MatchConfidence, MigrationSummary, PluginHit, PluginVerdict,
};
pub use crate::store::{AuditEvent, MemoryStore, NullStore, ScanStore};
pub use crate::synth::{synthesize, REVIEW_MARKER, SECRET_PLACEHOLDER};
