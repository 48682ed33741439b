use cimorph::synth::{self, DEFAULT_REVIEW_THRESHOLD};
use cimorph::{
    extract, resolve_credentials, resolve_plugins, scan_credentials, scan_plugins,
    CompatibilityTable, ComplexityTier, ResolveOptions, REVIEW_MARKER,
};
use chrono::{TimeZone, Utc};
use indoc::indoc;
use pretty_assertions::assert_eq;

const MATRIX_PIPELINE: &str = indoc! {"
    pipeline {
        agent any
        stages {
            stage('Build') {
                matrix {
                    axes {
                        axis {
                            name 'PLATFORM'
                            values 'linux', 'windows'
                        }
                        axis {
                            name 'ARCH'
                            values 'amd64', 'arm64'
                        }
                    }
                    stages {
                        stage('Compile') { steps { sh 'make' } }
                    }
                }
            }
        }
    }
"};

fn synthesize_fixed(script: &str, tier: ComplexityTier) -> String {
    let extraction = extract(script);
    let verdicts = resolve_plugins(&CompatibilityTable::builtin(), &scan_plugins(script));
    let specs = resolve_credentials(&scan_credentials(script), &ResolveOptions::default());
    let ts = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
    synth::synthesize_at(&extraction, &verdicts, &specs, tier, DEFAULT_REVIEW_THRESHOLD, ts)
}

#[test]
fn identical_inputs_yield_byte_identical_text() {
    let a = synthesize_fixed(MATRIX_PIPELINE, ComplexityTier::Moderate);
    let b = synthesize_fixed(MATRIX_PIPELINE, ComplexityTier::Moderate);
    assert_eq!(a, b);
}

#[test]
fn matrix_emits_native_axes_once() {
    let text = synthesize_fixed(MATRIX_PIPELINE, ComplexityTier::Simple);
    assert!(text.contains("parallel:"));
    assert!(text.contains("PLATFORM: [\"linux\", \"windows\"]"));
    assert!(text.contains("ARCH: [\"amd64\", \"arm64\"]"));
    // Axes are declared, never pre-expanded into four jobs.
    assert_eq!(text.matches("build-job:").count(), 1);
    assert!(!text.contains("linux-amd64"));
}

#[test]
fn output_is_valid_yaml() {
    let text = synthesize_fixed(MATRIX_PIPELINE, ComplexityTier::Complex);
    let value: serde_yaml::Value = serde_yaml::from_str(&text).expect("output must parse");
    let stages = value.get("stages").expect("stages key");
    assert!(stages.as_sequence().is_some());
}

#[test]
fn stage_count_scales_with_tier() {
    let simple = synthesize_fixed("pipeline { stages { } }", ComplexityTier::Simple);
    let complex = synthesize_fixed("pipeline { stages { } }", ComplexityTier::Complex);
    let count = |text: &str| {
        text.lines()
            .skip_while(|l| *l != "stages:")
            .skip(1)
            .take_while(|l| l.starts_with("  - "))
            .count()
    };
    assert_eq!(count(&simple), 2);
    assert_eq!(count(&complex), 4);
}

#[test]
fn low_confidence_items_are_discoverable_by_text_search() {
    let script = indoc! {"
        pipeline {
            stages {
                stage('X') {
                    steps {
                        milestone(3)
                        publishHTML(target: [reportDir: 'out'])
                    }
                }
            }
        }
    "};
    let text = synthesize_fixed(script, ComplexityTier::Moderate);
    let marker_lines: Vec<&str> = text
        .lines()
        .filter(|l| l.contains(REVIEW_MARKER.trim_start_matches("# ")))
        .collect();
    assert!(
        marker_lines.iter().any(|l| l.contains("milestone")),
        "milestone needs a review marker: {text}"
    );
    assert!(
        marker_lines.iter().any(|l| l.contains("html-publisher")),
        "html-publisher needs a review marker: {text}"
    );
}

#[test]
fn generic_credentials_are_flagged_inline() {
    let script = "pipeline {\n  environment { S = credentials('opaque-blob') }\n  stages { }\n}";
    let text = synthesize_fixed(script, ComplexityTier::Simple);
    assert!(text.contains(REVIEW_MARKER));
    assert!(text.contains("'opaque-blob' resolved via the generic default"));
}
