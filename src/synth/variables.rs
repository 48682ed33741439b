use crate::core::{FeatureSet, ParamKind};
use crate::credentials::VariableSpec;

/// Placeholder written instead of any credential value. The synthesizer
/// must never fabricate a plausible secret.
pub const SECRET_PLACEHOLDER: &str = "<set in GitLab CI/CD variables>";

/// Inline marker for anything that needs human review. Greppable in the
/// output itself, not only in a side report.
pub const REVIEW_MARKER: &str = "# REVIEW[cimorph]:";

/// Renders the `variables:` block: parameters with tier-appropriate default
/// propagation, environment entries as-is, credential specs as named
/// placeholders only.
pub fn render_variables(features: &FeatureSet, specs: &[VariableSpec]) -> String {
    let mut out = String::new();
    if features.parameters.is_empty() && features.environment.is_empty() && specs.is_empty() {
        return out;
    }

    out.push_str("variables:\n");

    for param in &features.parameters {
        let value = param
            .default
            .clone()
            .or_else(|| match param.kind {
                // A choice parameter defaults to its first listed choice.
                ParamKind::Choice => param.choices.first().cloned(),
                ParamKind::Bool => Some("false".to_string()),
                _ => None,
            })
            .unwrap_or_default();
        if param.kind == ParamKind::Password {
            out.push_str(&format!("  {}: \"{SECRET_PLACEHOLDER}\"\n", param.name));
            continue;
        }
        out.push_str(&format!("  {}: \"{}\"\n", param.name, value));
    }

    for (key, value) in &features.environment {
        out.push_str(&format!("  {key}: \"{value}\"\n"));
    }

    if !specs.is_empty() {
        out.push_str("  # Credential-derived variables: provision under Settings > CI/CD > Variables.\n");
        for spec in specs {
            let placeholder = match spec.value_kind {
                crate::credentials::ValueKind::File => "<file-type variable>",
                crate::credentials::ValueKind::Text => SECRET_PLACEHOLDER,
            };
            out.push_str(&format!("  {}: \"{placeholder}\"\n", spec.key));
            if spec.is_generic() {
                out.push_str(&format!(
                    "  {REVIEW_MARKER} '{}' resolved via the generic default; confirm the secret type\n",
                    spec.source_id
                ));
            }
        }
    }

    out
}
