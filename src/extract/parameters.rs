use super::{find_block, unquote};
use crate::core::{ParamKind, Parameter};
use once_cell::sync::Lazy;
use regex::Regex;

static PARAM_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(string|text|booleanParam|choice|password)\s*\(([^\n]*)\)").unwrap()
});

static NAME_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"name\s*:\s*['"]([^'"]+)['"]"#).unwrap());

static DEFAULT_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"defaultValue\s*:\s*('[^']*'|"[^"]*"|true|false|[\w.-]+)"#).unwrap());

static CHOICES_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"choices\s*:\s*\[([^\]]*)\]").unwrap());

static CHOICES_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"choices\s*:\s*['"]([^'"]+)['"]"#).unwrap());

/// Extracts the `parameters { }` block into ordered parameter declarations.
/// Entries without a recognizable name are skipped rather than failing.
pub fn extract(script: &str) -> Vec<Parameter> {
    let Some(block) = find_block(script, "parameters") else {
        return Vec::new();
    };

    PARAM_ENTRY
        .captures_iter(block.body)
        .filter_map(|caps| {
            let kind = match &caps[1] {
                "string" | "text" => ParamKind::Text,
                "booleanParam" => ParamKind::Bool,
                "choice" => ParamKind::Choice,
                "password" => ParamKind::Password,
                _ => return None,
            };
            let args = &caps[2];
            let name = NAME_ARG.captures(args)?.get(1)?.as_str().to_string();
            Some(Parameter {
                name,
                kind,
                default: extract_default(args),
                choices: extract_choices(args),
            })
        })
        .collect()
}

fn extract_default(args: &str) -> Option<String> {
    DEFAULT_ARG
        .captures(args)
        .map(|caps| unquote(&caps[1]).to_string())
}

/// Choices appear either as a Groovy list or as a newline-separated string.
fn extract_choices(args: &str) -> Vec<String> {
    if let Some(caps) = CHOICES_LIST.captures(args) {
        return caps[1]
            .split(',')
            .map(|c| unquote(c).to_string())
            .filter(|c| !c.is_empty())
            .collect();
    }
    if let Some(caps) = CHOICES_STRING.captures(args) {
        return caps[1]
            .split("\\n")
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
    }
    Vec::new()
}
