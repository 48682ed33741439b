use super::aliases::canonicalize;
use super::compat::CompatibilityTable;
use super::signatures::{is_excluded, is_skippable_line, SIGNATURES};
use super::{MatchConfidence, MigrationSummary, PluginHit, PluginVerdict};
use crate::core::SupportTier;
use std::collections::HashSet;

/// Scans the raw script for capability-usage signatures.
///
/// Evaluates the ordered signature table per line, skipping comments and
/// blanks, canonicalizing every matched token through the alias table. A
/// token claimed by an earlier signature on the same line is not re-claimed
/// by the generic catch-all. Hits come back sorted by line.
pub fn scan(text: &str) -> Vec<PluginHit> {
    let mut hits = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if is_skippable_line(line) {
            continue;
        }
        let mut claimed: HashSet<String> = HashSet::new();
        for signature in SIGNATURES.iter() {
            for caps in signature.regex.captures_iter(line) {
                let token = caps
                    .get(1)
                    .or_else(|| caps.get(0))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                if token.is_empty() || is_excluded(token) {
                    continue;
                }
                let canonical_id = canonicalize(token);
                if !claimed.insert(canonical_id.clone()) {
                    continue;
                }
                hits.push(PluginHit {
                    canonical_id,
                    line: idx + 1,
                    matched: token.to_string(),
                    confidence: signature.confidence,
                });
            }
        }
    }

    hits
}

/// Resolves hits into verdicts through the compatibility table.
///
/// Hits merge by canonical id (one verdict per id, contributing hits sorted
/// by line). A table miss yields the conservative unsupported verdict,
/// never a guess. Verdict order follows first-occurrence line.
pub fn resolve(table: &CompatibilityTable, hits: &[PluginHit]) -> Vec<PluginVerdict> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: std::collections::HashMap<String, Vec<PluginHit>> =
        std::collections::HashMap::new();

    for hit in hits {
        if !grouped.contains_key(&hit.canonical_id) {
            order.push(hit.canonical_id.clone());
        }
        grouped.entry(hit.canonical_id.clone()).or_default().push(hit.clone());
    }

    let mut verdicts: Vec<PluginVerdict> = order
        .into_iter()
        .map(|id| {
            let mut contributing = grouped.remove(&id).unwrap_or_default();
            contributing.sort_by_key(|h| h.line);
            match table.lookup(&id) {
                Some(entry) => PluginVerdict {
                    id,
                    tier: entry.tier,
                    gitlab_equivalent: entry.equivalent.clone(),
                    include_ref: entry.include_ref.clone(),
                    note: entry.note.clone(),
                    doc_url: entry.doc_url.clone(),
                    alternative: entry.alternative.clone(),
                    hits: contributing,
                    complexity: entry.tier.complexity(),
                },
                None => PluginVerdict {
                    id,
                    tier: SupportTier::Unsupported,
                    gitlab_equivalent: None,
                    include_ref: None,
                    note: "unknown, requires manual research".to_string(),
                    doc_url: None,
                    alternative: None,
                    hits: contributing,
                    complexity: SupportTier::Unsupported.complexity(),
                },
            }
        })
        .collect();

    verdicts.sort_by_key(|v| v.first_line());
    verdicts
}

/// Readiness score: weighted tier average scaled to 0-100. Defined as 100
/// for an empty verdict list.
pub fn readiness_score(verdicts: &[PluginVerdict]) -> u32 {
    if verdicts.is_empty() {
        return 100;
    }
    let weighted: u32 = verdicts.iter().map(|v| v.tier.weight()).sum();
    let total = (verdicts.len() * 100) as f64;
    ((100.0 * weighted as f64 / total).round()) as u32
}

/// Aggregates verdicts into per-tier counts and the readiness score.
pub fn summarize(verdicts: &[PluginVerdict]) -> MigrationSummary {
    let count = |tier| verdicts.iter().filter(|v| v.tier == tier).count();
    MigrationSummary {
        total: verdicts.len(),
        native: count(SupportTier::Native),
        templated: count(SupportTier::Templated),
        limited: count(SupportTier::Limited),
        unsupported: count(SupportTier::Unsupported),
        score: readiness_score(verdicts),
    }
}

/// Display order: tier priority, then lexical id.
pub fn display_order(verdicts: &mut [PluginVerdict]) {
    verdicts.sort_by(|a, b| {
        a.tier
            .display_priority()
            .cmp(&b.tier.display_priority())
            .then_with(|| a.id.cmp(&b.id))
    });
}
