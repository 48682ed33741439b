use super::VariableSpec;
use std::collections::HashSet;

pub const RESERVED_PREFIX: &str = "CI_";
pub const APP_MARKER: &str = "APP_";

/// Sanitizes a source credential id into a valid target variable key:
/// uppercase, every non `[A-Z0-9_]` run collapsed to one `_`, leading and
/// trailing `_` trimmed, `VAR_` prefixed when the result starts with a
/// digit, and the application marker prefixed when the result collides
/// with the platform's reserved prefix.
pub fn sanitize_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut last_was_sep = false;
    for c in raw.to_uppercase().chars() {
        if c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' {
            key.push(c);
            last_was_sep = c == '_';
        } else if !last_was_sep {
            key.push('_');
            last_was_sep = true;
        }
    }
    let mut key = key.trim_matches('_').to_string();

    if key.is_empty() {
        key = "VAR".to_string();
    }
    if key.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        key = format!("VAR_{key}");
    }
    if key.starts_with(RESERVED_PREFIX) {
        key = format!("{APP_MARKER}{key}");
    }
    key
}

/// Collapses specs by proposed key, keeping the first. Two distinct source
/// ids that sanitize identically silently merge.
pub fn dedup_by_key(specs: Vec<VariableSpec>) -> Vec<VariableSpec> {
    let mut seen: HashSet<String> = HashSet::new();
    specs
        .into_iter()
        .filter(|spec| {
            let fresh = seen.insert(spec.key.clone());
            if !fresh {
                log::debug!(
                    "dropping variable spec for '{}': key {} already taken",
                    spec.source_id,
                    spec.key
                );
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{SecretClass, ValueKind};

    fn spec(source_id: &str, key: &str) -> VariableSpec {
        VariableSpec {
            source_id: source_id.to_string(),
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
    fn uppercases_and_collapses_separators() {
        assert_eq!(sanitize_key("my-secret-id"), "MY_SECRET_ID");
        assert_eq!(sanitize_key("a..b--c  d"), "A_B_C_D");
    }

    #[test]
    fn trims_leading_and_trailing_underscores() {
        assert_eq!(sanitize_key("--token--"), "TOKEN");
        assert_eq!(sanitize_key("__already__"), "ALREADY");
    }

    #[test]
    fn leading_digit_gets_var_prefix() {
        assert_eq!(sanitize_key("2fa-code"), "VAR_2FA_CODE");
    }

    #[test]
    fn reserved_prefix_gets_application_marker() {
        assert_eq!(sanitize_key("CI_SECRET"), "APP_CI_SECRET");
        assert_eq!(sanitize_key("ci-job-token"), "APP_CI_JOB_TOKEN");
    }

    #[test]
    fn degenerate_input_still_yields_a_valid_key() {
        assert_eq!(sanitize_key("---"), "VAR");
        assert_eq!(sanitize_key(""), "VAR");
    }

    #[test]
    fn dedup_keeps_first_spec_per_key() {
        let specs = vec![
            spec("my-secret", "MY_SECRET"),
            spec("my.secret", "MY_SECRET"),
            spec("other", "OTHER"),
        ];
        let deduped = dedup_by_key(specs);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].source_id, "my-secret");
        assert_eq!(deduped[1].key, "OTHER");
    }
}
