use super::{find_blocks, line_of, unquote};
use crate::core::{BindingKind, CredentialBinding};
use once_cell::sync::Lazy;
use regex::Regex;

static ENV_ASSIGN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.+?)\s*$").unwrap());

static CREDENTIALS_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"credentials\s*\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());

/// Extracts every `environment { }` block (top-level and per-stage) into an
/// ordered key/value map, recording `credentials(...)` values as bindings
/// instead of plain entries.
pub fn extract(script: &str) -> (Vec<(String, String)>, Vec<CredentialBinding>) {
    let mut env = Vec::new();
    let mut bindings = Vec::new();

    for block in find_blocks(script, "environment") {
        for caps in ENV_ASSIGN.captures_iter(block.body) {
            let key = caps[1].to_string();
            let raw_value = caps[2].trim();
            if let Some(cred) = CREDENTIALS_VALUE.captures(raw_value) {
                let offset = caps.get(0).map(|m| m.start()).unwrap_or(0);
                bindings.push(CredentialBinding {
                    id: cred[1].to_string(),
                    env_var: Some(key),
                    kind: BindingKind::Helper,
                    line: block.start_line + line_of(block.body, offset) - 1,
                });
            } else if !env.iter().any(|(k, _)| k == &key) {
                env.push((key, unquote(raw_value).to_string()));
            }
        }
    }

    (env, bindings)
}
