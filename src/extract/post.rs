use super::{find_block, find_blocks};
use crate::core::PostAction;
use once_cell::sync::Lazy;
use regex::Regex;

const PHASES: &[&str] = &[
    "always", "success", "failure", "unstable", "changed", "aborted", "cleanup",
];

static STEP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*([a-zA-Z][A-Za-z0-9_]*)\b").unwrap());

/// Extracts the `post { }` section as a phase -> step-tag map. Only the
/// leading step name of each line is recorded; arguments stay behind for
/// the plugin resolver.
pub fn extract(script: &str) -> Vec<PostAction> {
    let Some(post) = find_block(script, "post") else {
        return Vec::new();
    };

    PHASES
        .iter()
        .filter_map(|phase| {
            let block = find_blocks(post.body, phase).into_iter().next()?;
            let actions: Vec<String> = STEP_TAG
                .captures_iter(block.body)
                .map(|caps| caps[1].to_string())
                .filter(|tag| !PHASES.contains(&tag.as_str()))
                .collect();
            if actions.is_empty() {
                return None;
            }
            Some(PostAction {
                phase: phase.to_string(),
                actions,
            })
        })
        .collect()
}
