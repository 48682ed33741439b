use super::find_blocks;
use once_cell::sync::Lazy;
use regex::Regex;

static STAGE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"stage\s*\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());

/// Extracts conditional guards: the condition lines of every `when { }`
/// block, trimmed, one entry per condition.
pub fn extract_guards(script: &str) -> Vec<String> {
    find_blocks(script, "when")
        .into_iter()
        .flat_map(|block| {
            block
                .body
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && *line != "{" && *line != "}")
                .map(|line| line.trim_end_matches('{').trim().to_string())
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Names of stages declared inside `parallel { }` blocks, in order.
pub fn extract_parallel_stages(script: &str) -> Vec<String> {
    find_blocks(script, "parallel")
        .into_iter()
        .flat_map(|block| {
            STAGE_NAME
                .captures_iter(block.body)
                .map(|caps| caps[1].to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}
