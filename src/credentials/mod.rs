pub mod classify;
pub mod sanitize;
pub mod scanner;
pub mod validate;

pub use validate::ValidationReport;

use crate::core::BindingKind;
use serde::{Deserialize, Serialize};

/// GitLab variable value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    File,
}

/// Secret classification result. `Generic` marks the fall-through default
/// and triggers a review annotation in the synthesized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretClass {
    PairedCredentials,
    Registry,
    Token,
    FileBearing,
    SshKey,
    Database,
    CloudProvider,
    Generic,
}

/// One credential reference found in the source script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialHit {
    pub id: String,
    pub line: usize,
    pub kind: BindingKind,
    pub matched: String,
}

/// Fully resolved description of one target variable to provision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub source_id: String,
    pub key: String,
    pub value_kind: ValueKind,
    pub masked: bool,
    pub protected: bool,
    pub scope: String,
    pub description: String,
    pub class: SecretClass,
    /// Child specs of a composite classification. When non-empty, the
    /// children are emitted and this parent is not.
    pub children: Vec<VariableSpec>,
}

impl VariableSpec {
    /// Whether this spec fell through to the generic default classifier.
    pub fn is_generic(&self) -> bool {
        self.class == SecretClass::Generic
    }
}

/// Resolution options, injected per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveOptions {
    pub protected: bool,
    pub scope: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            protected: false,
            scope: "*".to_string(),
        }
    }
}
