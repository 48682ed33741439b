use crate::credentials::{ValueKind, VariableSpec};

/// Renders a `.env`-style provisioning template: one `KEY=<placeholder>`
/// line per spec, file-typed entries using a distinct placeholder. Never
/// contains an actual secret value.
pub fn env_file_template(specs: &[VariableSpec]) -> String {
    let mut out = String::from("# Variable provisioning template\n");
    out.push_str("# Fill the placeholders, then feed this file to the provisioning script.\n");
    for spec in specs {
        if !spec.description.is_empty() {
            out.push_str(&format!("# {}\n", spec.description));
        }
        let placeholder = match spec.value_kind {
            ValueKind::Text => "<value>",
            ValueKind::File => "<path-to-file>",
        };
        out.push_str(&format!("{}={placeholder}\n", spec.key));
    }
    out
}

/// Renders a batched provisioning script for the target platform's CLI.
/// Dry-run capable, with precondition checks; a textual artifact only,
/// never executed by the engine.
pub fn provisioning_script(specs: &[VariableSpec]) -> String {
    let mut out = String::from("#!/usr/bin/env bash\n");
    out.push_str("# Provisions CI/CD variables from a filled-in .env template.\n");
    out.push_str("# Usage: provision-variables.sh <env-file> [--dry-run]\n");
    out.push_str("set -euo pipefail\n\n");
    out.push_str("ENV_FILE=\"${1:?usage: provision-variables.sh <env-file> [--dry-run]}\"\n");
    out.push_str("DRY_RUN=\"${2:-}\"\n\n");
    out.push_str("command -v glab >/dev/null || { echo \"glab CLI is required\" >&2; exit 1; }\n");
    out.push_str("glab auth status >/dev/null || { echo \"not authenticated; run glab auth login\" >&2; exit 1; }\n");
    out.push_str("[ -r \"$ENV_FILE\" ] || { echo \"cannot read $ENV_FILE\" >&2; exit 1; }\n\n");
    out.push_str("run() {\n");
    out.push_str("  if [ \"$DRY_RUN\" = \"--dry-run\" ]; then\n");
    out.push_str("    echo \"[dry-run] $*\"\n");
    out.push_str("  else\n");
    out.push_str("    \"$@\"\n");
    out.push_str("  fi\n");
    out.push_str("}\n\n");
    out.push_str("source \"$ENV_FILE\"\n\n");

    for spec in specs {
        let masked = if spec.masked { "true" } else { "false" };
        let protected = if spec.protected { "true" } else { "false" };
        let var_type = match spec.value_kind {
            ValueKind::Text => "env_var",
            ValueKind::File => "file",
        };
        out.push_str(&format!(
            "run glab variable set {key} \"${{{key}:?{key} missing from env file}}\" \\\n  --masked={masked} --protected={protected} --type={var_type} --scope \"{scope}\"\n",
            key = spec.key,
            scope = spec.scope,
        ));
    }

    out
}
