use crate::core::ComplexityTier;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Engine configuration. Loadable from `cimorph.toml`; every field has a
/// default so a missing file or a partial file both work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslationConfig {
    /// Complexity tier hint driving the synthesized stage topology.
    pub tier: ComplexityTier,

    /// Verdicts with confidence below this get inline review comments.
    pub review_threshold: f64,

    /// Mark provisioned variables as protected.
    pub protected_variables: bool,

    /// Environment scope for provisioned variables.
    pub variable_scope: String,

    /// Optional TOML file overriding rows of the built-in compatibility
    /// table.
    pub compat_overrides: Option<PathBuf>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        TranslationConfig {
            tier: ComplexityTier::default(),
            review_threshold: crate::synth::DEFAULT_REVIEW_THRESHOLD,
            protected_variables: false,
            variable_scope: "*".to_string(),
            compat_overrides: None,
        }
    }
}

impl TranslationConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: TranslationConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `cimorph.toml` from the given directory if present, else the
    /// defaults.
    pub fn load_or_default(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join("cimorph.toml");
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.review_threshold) {
            return Err(ConfigError::Invalid(format!(
                "review_threshold must be between 0.0 and 1.0, got {}",
                self.review_threshold
            )));
        }
        if self.variable_scope.is_empty() {
            return Err(ConfigError::Invalid(
                "variable_scope must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
