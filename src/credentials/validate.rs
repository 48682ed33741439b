use super::sanitize::{APP_MARKER, RESERVED_PREFIX};
use super::{ValueKind, VariableSpec};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Target-platform variable key grammar.
pub static KEY_GRAMMAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z_][A-Z0-9_]*$").unwrap());

/// Keys longer than this still work but are painful to manage.
pub const MAX_KEY_LENGTH: usize = 255;

/// Structured validation result. Naming violations are reported as values,
/// never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validates a resolved spec set: duplicate keys and grammar mismatches
/// are errors; reserved-prefix, overlong-key and masked-file conflicts are
/// warnings. The reserved-prefix check runs even after sanitization.
pub fn validate(specs: &[VariableSpec]) -> ValidationReport {
    let mut report = ValidationReport {
        valid: true,
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    let mut seen: HashSet<&str> = HashSet::new();
    for spec in specs {
        if !seen.insert(spec.key.as_str()) {
            report
                .errors
                .push(format!("duplicate key: {}", spec.key));
        }
        if !KEY_GRAMMAR.is_match(&spec.key) {
            report.errors.push(format!(
                "key '{}' does not match the required grammar ^[A-Z_][A-Z0-9_]*$",
                spec.key
            ));
        }
        if reserved_prefix_violation(spec) {
            report.warnings.push(format!(
                "key '{}' uses the reserved prefix {RESERVED_PREFIX} (from source id '{}')",
                spec.key, spec.source_id
            ));
        }
        if spec.key.len() > MAX_KEY_LENGTH {
            report.warnings.push(format!(
                "key '{}' exceeds {MAX_KEY_LENGTH} characters",
                spec.key
            ));
        }
        if spec.masked && spec.value_kind == ValueKind::File {
            report.warnings.push(format!(
                "key '{}': masked variables cannot be file-typed; masking will be ignored",
                spec.key
            ));
        }
    }

    report.valid = report.errors.is_empty();
    report
}

/// A raw source id carrying the reserved prefix is reported even though
/// sanitization will have rewritten the key with the application marker.
fn reserved_prefix_violation(spec: &VariableSpec) -> bool {
    let key_violates = spec.key.starts_with(RESERVED_PREFIX)
        && !spec.key.starts_with(&format!("{APP_MARKER}{RESERVED_PREFIX}"));
    let source_violates = spec
        .source_id
        .to_uppercase()
        .replace('-', "_")
        .starts_with(RESERVED_PREFIX);
    key_violates || source_violates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::SecretClass;

    fn spec(key: &str) -> VariableSpec {
        VariableSpec {
            source_id: key.to_lowercase(),
            key: key.to_string(),
            value_kind: ValueKind::Text,
            masked: true,
            protected: false,
            scope: "*".to_string(),
            description: String::new(),
            class: SecretClass::Generic,
            children: Vec::new(),
        }
    }

    #[test]
    fn clean_specs_validate() {
        let report = validate(&[spec("MY_SECRET_ID"), spec("OTHER_KEY")]);
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn duplicate_keys_are_errors() {
        let report = validate(&[spec("SAME"), spec("SAME")]);
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["duplicate key: SAME"]);
    }

    #[test]
    fn grammar_mismatch_is_an_error() {
        let report = validate(&[spec("lower_case")]);
        assert!(!report.valid);
        assert!(report.errors[0].contains("does not match"));
    }

    #[test]
    fn reserved_prefix_source_id_warns_even_after_sanitization() {
        let mut s = spec("APP_CI_SECRET");
        s.source_id = "CI_SECRET".to_string();
        let report = validate(&[s]);
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("reserved prefix"));
    }

    #[test]
    fn unsanitized_reserved_key_warns() {
        let report = validate(&[spec("CI_TOKEN")]);
        assert!(report.warnings.iter().any(|w| w.contains("reserved prefix")));
    }

    #[test]
    fn overlong_key_warns() {
        let long = "K".repeat(MAX_KEY_LENGTH + 1);
        let report = validate(&[spec(&long)]);
        assert!(report.valid);
        assert!(report.warnings[0].contains("exceeds"));
    }

    #[test]
    fn masked_file_kind_warns() {
        let mut s = spec("KUBE_CONFIG");
        s.value_kind = ValueKind::File;
        s.masked = true;
        let report = validate(&[s]);
        assert!(report.warnings.iter().any(|w| w.contains("file-typed")));
    }

    #[test]
    fn empty_spec_list_is_valid() {
        assert!(validate(&[]).valid);
    }
}
