use crate::core::{RetentionPolicy, TimeUnit, Timeout};
use once_cell::sync::Lazy;
use regex::Regex;

static TIMEOUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"timeout\s*\(\s*time\s*:\s*(\d+)\s*,\s*unit\s*:\s*['"](\w+)['"]"#).unwrap()
});

static TIMEOUT_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"timeout\s*\(\s*(\d+)\s*\)").unwrap());

static RETRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"retry\s*\(\s*(\d+)\s*\)").unwrap());

static DAYS_TO_KEEP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"daysToKeepStr\s*:\s*['"](\d+)['"]"#).unwrap());

static BUILDS_TO_KEEP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"numToKeepStr\s*:\s*['"](\d+)['"]"#).unwrap());

/// Extracts run options: timeout, retry count and the retention policy
/// from `buildDiscarder(logRotator(...))`.
pub fn extract(script: &str) -> (Option<Timeout>, u32, Option<RetentionPolicy>) {
    (
        extract_timeout(script),
        extract_retry(script),
        extract_retention(script),
    )
}

fn extract_timeout(script: &str) -> Option<Timeout> {
    if let Some(caps) = TIMEOUT.captures(script) {
        let amount = caps[1].parse().ok()?;
        let unit = match caps[2].to_ascii_uppercase().as_str() {
            "SECONDS" => TimeUnit::Seconds,
            "HOURS" => TimeUnit::Hours,
            _ => TimeUnit::Minutes,
        };
        return Some(Timeout { amount, unit });
    }
    // Bare form defaults to minutes in the source DSL.
    TIMEOUT_BARE.captures(script).and_then(|caps| {
        Some(Timeout {
            amount: caps[1].parse().ok()?,
            unit: TimeUnit::Minutes,
        })
    })
}

fn extract_retry(script: &str) -> u32 {
    RETRY
        .captures(script)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

fn extract_retention(script: &str) -> Option<RetentionPolicy> {
    if !script.contains("buildDiscarder") && !script.contains("logRotator") {
        return None;
    }
    let policy = RetentionPolicy {
        days_to_keep: DAYS_TO_KEEP.captures(script).and_then(|c| c[1].parse().ok()),
        builds_to_keep: BUILDS_TO_KEEP
            .captures(script)
            .and_then(|c| c[1].parse().ok()),
    };
    Some(policy)
}
