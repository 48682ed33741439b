use super::variables::REVIEW_MARKER;
use crate::core::FeatureSet;
use crate::plugins::PluginVerdict;

/// Job assembly: one synthesis function per recognized capability, so each
/// stub's shape stays hand-tunable instead of flowing through a generic
/// templating layer.

fn has_verdict(verdicts: &[PluginVerdict], id: &str) -> bool {
    verdicts.iter().any(|v| v.id == id)
}

fn verdict<'a>(verdicts: &'a [PluginVerdict], id: &str) -> Option<&'a PluginVerdict> {
    verdicts.iter().find(|v| v.id == id)
}

/// `include:` entries for verdicts resolved to a template reference.
pub fn render_includes(verdicts: &[PluginVerdict]) -> String {
    let mut refs: Vec<&str> = verdicts
        .iter()
        .filter_map(|v| v.include_ref.as_deref())
        .collect();
    refs.sort_unstable();
    refs.dedup();
    if refs.is_empty() {
        return String::new();
    }
    let mut out = String::from("include:\n");
    for r in refs {
        out.push_str(&format!("  - template: {r}\n"));
    }
    out.push('\n');
    out
}

/// Workflow-level defaults derived from run options.
pub fn render_defaults(features: &FeatureSet) -> String {
    let mut lines = Vec::new();
    if let Some(timeout) = &features.timeout {
        lines.push(format!("  timeout: {}", timeout.gitlab_value()));
    }
    if features.retry > 0 {
        // GitLab caps retry at 2.
        lines.push(format!("  retry: {}", features.retry.min(2)));
    }
    if lines.is_empty() {
        return String::new();
    }
    format!("default:\n{}\n\n", lines.join("\n"))
}

pub fn render_jobs(
    features: &FeatureSet,
    verdicts: &[PluginVerdict],
    stages: &[&str],
    review_threshold: f64,
) -> String {
    let mut out = String::new();

    out.push_str(&build_job(features));
    out.push_str(&test_job(features, verdicts, review_threshold));

    if stages.contains(&"package") {
        out.push_str(&package_job(verdicts, review_threshold));
    }
    if has_verdict(verdicts, "sonar") {
        out.push_str(&sonar_job(verdicts, review_threshold));
    }
    if has_verdict(verdicts, "input") {
        out.push_str(&manual_gate_job(stages));
    }
    if stages.contains(&"deploy") {
        out.push_str(&deploy_job(features, verdicts, review_threshold));
    }
    if has_verdict(verdicts, "build-trigger") {
        out.push_str(&trigger_job(stages));
    }
    if has_verdict(verdicts, "slack") || has_verdict(verdicts, "email") {
        out.push_str(&notify_job(verdicts, stages, review_threshold));
    }
    if stages.contains(&"cleanup") {
        out.push_str(&cleanup_job());
    }

    out.push_str(&unmapped_capabilities(verdicts, review_threshold));
    out
}

/// Advisory comment emitted next to a stub synthesized from a verdict the
/// resolver is not confident about.
fn review_note(v: &PluginVerdict, threshold: f64) -> String {
    if v.confidence() >= threshold {
        return String::new();
    }
    format!(
        "  {REVIEW_MARKER} '{}' is {} on GitLab CI — {}\n",
        v.id,
        v.tier.label().to_lowercase(),
        v.note
    )
}

fn build_job(features: &FeatureSet) -> String {
    let mut out = String::from("build-job:\n  stage: build\n");
    out.push_str(&matrix_block(features));
    out.push_str("  script:\n    - echo \"Port the build steps of the source pipeline here\"\n");
    if !features.parallel_stages.is_empty() {
        out.push_str(&format!(
            "  # Source pipeline ran these stages in parallel: {}\n",
            features.parallel_stages.join(", ")
        ));
    }
    out.push('\n');
    out
}

/// A non-empty matrix emits the axis definition through the platform's
/// native cross-product construct; fan-out is delegated to the runtime,
/// never pre-expanded here.
fn matrix_block(features: &FeatureSet) -> String {
    if features.matrix.is_empty() {
        return String::new();
    }
    let mut out = String::from("  parallel:\n    matrix:\n      - ");
    let axes: Vec<String> = features
        .matrix
        .iter()
        .map(|axis| {
            let values: Vec<String> = axis.values.iter().map(|v| format!("\"{v}\"")).collect();
            format!("{}: [{}]", axis.name, values.join(", "))
        })
        .collect();
    out.push_str(&axes.join("\n        "));
    out.push('\n');
    out
}

fn test_job(features: &FeatureSet, verdicts: &[PluginVerdict], threshold: f64) -> String {
    let mut out = String::from("test-job:\n  stage: test\n");
    out.push_str("  script:\n    - echo \"Port the test steps of the source pipeline here\"\n");
    let wants_junit = has_verdict(verdicts, "junit");
    let wants_paths = has_verdict(verdicts, "artifacts") || has_verdict(verdicts, "html-publisher");
    if wants_junit || wants_paths {
        out.push_str("  artifacts:\n");
        if let Some(expire) = artifacts_expiry(features) {
            out.push_str(&format!("    expire_in: {expire}\n"));
        }
        if wants_junit {
            out.push_str("    reports:\n      junit: \"**/target/*-reports/*.xml\"\n");
        }
        if wants_paths {
            out.push_str("    paths:\n      - \"dist/\"\n");
        }
    }
    for id in ["junit", "artifacts", "html-publisher"] {
        if let Some(v) = verdict(verdicts, id) {
            out.push_str(&review_note(v, threshold));
        }
    }
    out.push('\n');
    out
}

fn artifacts_expiry(features: &FeatureSet) -> Option<String> {
    features
        .retention
        .and_then(|r| r.days_to_keep)
        .map(|days| format!("{days} days"))
}

fn package_job(verdicts: &[PluginVerdict], threshold: f64) -> String {
    let mut out = String::from("package-job:\n  stage: package\n");
    // Pin builder images by digest before first use; the tag alone is not
    // a reproducibility guarantee.
    out.push_str("  image: docker:27\n");
    out.push_str("  services:\n    - docker:27-dind\n");
    out.push_str("  script:\n    - docker build -t \"$CI_REGISTRY_IMAGE:$CI_COMMIT_SHORT_SHA\" .\n");
    out.push_str("    - docker push \"$CI_REGISTRY_IMAGE:$CI_COMMIT_SHORT_SHA\"\n");
    if let Some(v) = verdict(verdicts, "docker") {
        out.push_str(&review_note(v, threshold));
    }
    out.push('\n');
    out
}

fn sonar_job(verdicts: &[PluginVerdict], threshold: f64) -> String {
    let mut out = String::from("sonar-job:\n  stage: test\n");
    out.push_str("  image: sonarsource/sonar-scanner-cli:11\n");
    out.push_str("  script:\n    - sonar-scanner -Dsonar.token=\"$SONAR_TOKEN\"\n");
    if let Some(v) = verdict(verdicts, "sonar") {
        out.push_str(&review_note(v, threshold));
    }
    out.push('\n');
    out
}

fn manual_gate_job(stages: &[&str]) -> String {
    let stage = if stages.contains(&"deploy") { "deploy" } else { "test" };
    format!(
        "approval-gate:\n  stage: {stage}\n  when: manual\n  allow_failure: false\n  script:\n    - echo \"Approved\"\n\n"
    )
}

fn deploy_job(features: &FeatureSet, verdicts: &[PluginVerdict], threshold: f64) -> String {
    let mut out = String::from("deploy-job:\n  stage: deploy\n");

    if has_verdict(verdicts, "ssh") {
        out.push_str("  before_script:\n");
        out.push_str("    - eval \"$(ssh-agent -s)\"\n");
        out.push_str("    - chmod 400 \"$SSH_PRIVATE_KEY\"\n");
        out.push_str("    - ssh-add \"$SSH_PRIVATE_KEY\"\n");
    }

    if has_verdict(verdicts, "kubernetes") {
        out.push_str("  image: bitnami/kubectl:1.31\n");
        out.push_str("  script:\n    - kubectl apply -f k8s/\n");
    } else {
        out.push_str("  script:\n    - echo \"Port the deploy steps of the source pipeline here\"\n");
    }

    if !features.guards.is_empty() {
        out.push_str("  rules:\n    - if: '$CI_COMMIT_BRANCH == $CI_DEFAULT_BRANCH'\n");
        for guard in &features.guards {
            out.push_str(&format!("  # source guard: {guard}\n"));
        }
    }

    for id in ["kubernetes", "ssh"] {
        if let Some(v) = verdict(verdicts, id) {
            out.push_str(&review_note(v, threshold));
        }
    }
    out.push('\n');
    out
}

fn trigger_job(stages: &[&str]) -> String {
    let stage = if stages.contains(&"deploy") { "deploy" } else { "test" };
    format!(
        "downstream-trigger:\n  stage: {stage}\n  trigger:\n    project: group/downstream-project\n    strategy: depend\n  {REVIEW_MARKER} set the downstream project path\n\n"
    )
}

fn notify_job(verdicts: &[PluginVerdict], stages: &[&str], threshold: f64) -> String {
    let stage = stages.last().copied().unwrap_or("test");
    let mut out = format!("notify-failure:\n  stage: {stage}\n  when: on_failure\n");
    out.push_str("  script:\n    - |\n      curl -sS -X POST \"$NOTIFY_WEBHOOK_URL\" \\\n        -H 'Content-Type: application/json' \\\n        -d \"{{\\\"text\\\": \\\"Pipeline failed: $CI_PIPELINE_URL\\\"}}\"\n");
    for id in ["slack", "email"] {
        if let Some(v) = verdict(verdicts, id) {
            out.push_str(&review_note(v, threshold));
        }
    }
    out.push('\n');
    out
}

fn cleanup_job() -> String {
    "cleanup-job:\n  stage: cleanup\n  when: always\n  script:\n    - echo \"Port post-build cleanup here\"\n\n"
        .to_string()
}

/// Capabilities with no synthesized stub still surface inline, so a text
/// search of the output finds every item needing review.
fn unmapped_capabilities(verdicts: &[PluginVerdict], threshold: f64) -> String {
    const STUBBED: &[&str] = &[
        "docker", "kubernetes", "junit", "artifacts", "sonar", "ssh", "input", "slack", "email",
        "build-trigger", "html-publisher",
    ];
    let mut flagged: Vec<&PluginVerdict> = verdicts
        .iter()
        .filter(|v| !STUBBED.contains(&v.id.as_str()) && v.confidence() < threshold)
        .collect();
    flagged.sort_by(|a, b| a.id.cmp(&b.id));
    if flagged.is_empty() {
        return String::new();
    }
    let mut out = String::from("# Capabilities without a direct mapping:\n");
    for v in flagged {
        let first_use = v.first_line();
        out.push_str(&format!(
            "{REVIEW_MARKER} '{}' (source line {first_use}, {}): {}\n",
            v.id,
            v.tier.label().to_lowercase(),
            v.note
        ));
        if let Some(alt) = &v.alternative {
            out.push_str(&format!("#   alternative: {alt}\n"));
        }
    }
    out.push('\n');
    out
}
