pub mod artifacts;
pub mod jobs;
pub mod stages;
pub mod variables;

pub use variables::{REVIEW_MARKER, SECRET_PLACEHOLDER};

use crate::core::{ComplexityTier, Extraction};
use crate::credentials::VariableSpec;
use crate::plugins::PluginVerdict;
use chrono::{DateTime, SecondsFormat, Utc};

/// Verdicts with confidence below this get inline review comments.
pub const DEFAULT_REVIEW_THRESHOLD: f64 = 0.7;

/// Synthesizes the target configuration text from the IR, the resolved
/// verdicts and the variable specs.
pub fn synthesize(
    extraction: &Extraction,
    verdicts: &[PluginVerdict],
    specs: &[VariableSpec],
    tier: ComplexityTier,
    review_threshold: f64,
) -> String {
    synthesize_at(extraction, verdicts, specs, tier, review_threshold, Utc::now())
}

/// Deterministic core: identical inputs produce byte-identical output
/// except for the timestamped header line.
pub fn synthesize_at(
    extraction: &Extraction,
    verdicts: &[PluginVerdict],
    specs: &[VariableSpec],
    tier: ComplexityTier,
    review_threshold: f64,
    timestamp: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# Generated by cimorph on {}\n",
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str("# Review every REVIEW[cimorph] marker before the first pipeline run.\n");

    if extraction.confidence < 1.0 {
        out.push_str(&format!(
            "{REVIEW_MARKER} extraction confidence {:.2}; parts of the source script were not understood\n",
            extraction.confidence
        ));
    }
    for region in &extraction.unparsed {
        out.push_str(&format!(
            "{REVIEW_MARKER} source lines {}-{} {}\n",
            region.start_line, region.end_line, region.reason
        ));
    }
    out.push('\n');

    out.push_str(&jobs::render_includes(verdicts));

    let plan = stages::stage_plan(tier, verdicts);
    out.push_str("stages:\n");
    for stage in &plan {
        out.push_str(&format!("  - {stage}\n"));
    }
    out.push('\n');

    out.push_str(&jobs::render_defaults(&extraction.features));

    let variables = variables::render_variables(&extraction.features, specs);
    if !variables.is_empty() {
        out.push_str(&variables);
        out.push('\n');
    }

    out.push_str(&jobs::render_jobs(
        &extraction.features,
        verdicts,
        &plan,
        review_threshold,
    ));

    // Trailing newline discipline: exactly one.
    while out.ends_with("\n\n") {
        out.pop();
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
