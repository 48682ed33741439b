use super::resolver::{display_order, summarize};
use super::PluginVerdict;
use crate::core::SupportTier;

const TIERS: &[SupportTier] = &[
    SupportTier::Native,
    SupportTier::Templated,
    SupportTier::Limited,
    SupportTier::Unsupported,
];

fn tier_heading(tier: SupportTier) -> &'static str {
    match tier {
        SupportTier::Native => "Native equivalents",
        SupportTier::Templated => "Templated (adapt an existing recipe)",
        SupportTier::Limited => "Limited (partial coverage)",
        SupportTier::Unsupported => "Unsupported (manual follow-up)",
    }
}

/// Renders the migration checklist: verdicts grouped by tier, ordered by
/// tier priority then lexical id, each with its note and optional doc link.
pub fn render_checklist(verdicts: &[PluginVerdict]) -> String {
    let mut ordered = verdicts.to_vec();
    display_order(&mut ordered);
    let summary = summarize(verdicts);

    let mut out = String::new();
    out.push_str("# Migration checklist\n\n");
    out.push_str(&format!(
        "Readiness score: **{}/100** ({} capabilities detected)\n",
        summary.score, summary.total
    ));

    if ordered.is_empty() {
        out.push_str("\nNo third-party capabilities detected.\n");
        return out;
    }

    for &tier in TIERS {
        let group: Vec<&PluginVerdict> = ordered.iter().filter(|v| v.tier == tier).collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!("\n## {}\n\n", tier_heading(tier)));
        for verdict in group {
            out.push_str(&format!(
                "- [ ] **{}** ({}) — {}",
                verdict.id,
                verdict.complexity.label(),
                verdict.note
            ));
            if let Some(equivalent) = &verdict.gitlab_equivalent {
                out.push_str(&format!(" → `{equivalent}`"));
            }
            if let Some(alternative) = &verdict.alternative {
                out.push_str(&format!(" (alternative: {alternative})"));
            }
            if let Some(url) = &verdict.doc_url {
                out.push_str(&format!(" [docs]({url})"));
            }
            out.push('\n');
        }
    }

    out
}
