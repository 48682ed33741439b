use serde::{Deserialize, Serialize};

/// Compatibility judgment for one capability on the target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportTier {
    Native,
    Templated,
    Limited,
    Unsupported,
}

impl SupportTier {
    /// Weight used by the readiness score aggregation.
    pub fn weight(self) -> u32 {
        match self {
            SupportTier::Native => 100,
            SupportTier::Templated => 85,
            SupportTier::Limited => 60,
            SupportTier::Unsupported => 0,
        }
    }

    /// Migration complexity is a pure function of the tier.
    pub fn complexity(self) -> Complexity {
        match self {
            SupportTier::Native => Complexity::Easy,
            SupportTier::Templated | SupportTier::Limited => Complexity::Medium,
            SupportTier::Unsupported => Complexity::Hard,
        }
    }

    /// Display ordering: best-supported tiers first.
    pub fn display_priority(self) -> u8 {
        match self {
            SupportTier::Native => 0,
            SupportTier::Templated => 1,
            SupportTier::Limited => 2,
            SupportTier::Unsupported => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SupportTier::Native => "Native",
            SupportTier::Templated => "Templated",
            SupportTier::Limited => "Limited",
            SupportTier::Unsupported => "Unsupported",
        }
    }

    /// Classification trust, 0-1. Anything below the review threshold gets
    /// an inline review marker in the synthesized output.
    pub fn confidence(self) -> f64 {
        match self {
            SupportTier::Native => 1.0,
            SupportTier::Templated => 0.85,
            SupportTier::Limited => 0.6,
            SupportTier::Unsupported => 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Easy,
    Medium,
    Hard,
}

impl Complexity {
    pub fn label(self) -> &'static str {
        match self {
            Complexity::Easy => "easy",
            Complexity::Medium => "medium",
            Complexity::Hard => "hard",
        }
    }
}

/// Coarse complexity tier driving the synthesized stage topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    Simple,
    #[default]
    Moderate,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Text,
    Bool,
    Choice,
    Password,
}

/// One `parameters { }` entry from the source pipeline, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<String>,
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timeout {
    pub amount: u32,
    pub unit: TimeUnit,
}

impl Timeout {
    /// GitLab `timeout:` accepts human-readable durations.
    pub fn gitlab_value(&self) -> String {
        let unit = match self.unit {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
        };
        format!("{} {}", self.amount, unit)
    }
}

/// One named matrix axis with its ordered values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixAxis {
    pub name: String,
    pub values: Vec<String>,
}

/// Post-build actions for one phase (`always`, `failure`, ...), recorded as
/// the step tags seen inside the phase block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostAction {
    pub phase: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RetentionPolicy {
    pub days_to_keep: Option<u32>,
    pub builds_to_keep: Option<u32>,
}

/// How a credential was bound in the source script. Drives the default
/// secret classification when no name heuristic matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// `credentials('id')` helper inside an environment block.
    Helper,
    /// `usernamePassword(credentialsId: ...)`
    UsernamePassword,
    /// `string(credentialsId: ...)`
    SecretText,
    /// `file(credentialsId: ...)`
    SecretFile,
    /// `sshUserPrivateKey(credentialsId: ...)`
    SshKey,
    /// ALL_CAPS environment name whose suffix implies secrecy.
    EnvHeuristic,
}

/// Credential use recorded while extracting environment assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialBinding {
    pub id: String,
    pub env_var: Option<String>,
    pub kind: BindingKind,
    pub line: usize,
}

/// Typed feature set extracted from one source script. Every field defaults
/// to empty; extraction never fails the run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    pub parameters: Vec<Parameter>,
    pub environment: Vec<(String, String)>,
    pub matrix: Vec<MatrixAxis>,
    pub timeout: Option<Timeout>,
    pub retry: u32,
    pub post_actions: Vec<PostAction>,
    pub retention: Option<RetentionPolicy>,
    pub credential_bindings: Vec<CredentialBinding>,
    pub guards: Vec<String>,
    pub parallel_stages: Vec<String>,
}

/// Script region the extractor could not interpret. Advisory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnparsedRegion {
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
    pub reason: String,
}

/// Extraction result: features plus a confidence estimate instead of a
/// success flag. There is no "extraction failed" outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub features: FeatureSet,
    pub confidence: f64,
    pub unparsed: Vec<UnparsedRegion>,
}

impl Default for Extraction {
    fn default() -> Self {
        Extraction {
            features: FeatureSet::default(),
            confidence: 1.0,
            unparsed: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_is_a_pure_function_of_tier() {
        assert_eq!(SupportTier::Native.complexity(), Complexity::Easy);
        assert_eq!(SupportTier::Templated.complexity(), Complexity::Medium);
        assert_eq!(SupportTier::Limited.complexity(), Complexity::Medium);
        assert_eq!(SupportTier::Unsupported.complexity(), Complexity::Hard);
    }

    #[test]
    fn tier_weights_match_score_model() {
        assert_eq!(SupportTier::Native.weight(), 100);
        assert_eq!(SupportTier::Templated.weight(), 85);
        assert_eq!(SupportTier::Limited.weight(), 60);
        assert_eq!(SupportTier::Unsupported.weight(), 0);
    }

    #[test]
    fn feature_set_defaults_to_empty_not_null() {
        let features = FeatureSet::default();
        assert!(features.parameters.is_empty());
        assert!(features.environment.is_empty());
        assert!(features.matrix.is_empty());
        assert!(features.timeout.is_none());
        assert_eq!(features.retry, 0);
        assert!(features.post_actions.is_empty());
    }

    #[test]
    fn timeout_renders_gitlab_duration() {
        let t = Timeout {
            amount: 30,
            unit: TimeUnit::Minutes,
        };
        assert_eq!(t.gitlab_value(), "30 minutes");
    }
}
