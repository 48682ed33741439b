use super::{line_of, matching_brace, unquote};
use crate::core::{Extraction, FeatureSet, UnparsedRegion};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Highest confidence the fallback path may ever claim.
const CONFIDENCE_CAP: f64 = 0.9;
const CONFIDENCE_FLOOR_BOOST: f64 = 0.4;

pub const MANUAL_REVIEW_REASON: &str = "requires manual review";

static STAGE_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:stage|node|job)\b[^\n]*[({]").unwrap());

static PLUGIN_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*([a-z][A-Za-z0-9]*)\s*(?:\(|\s+['\x22])").unwrap());

static ENV_ASSIGN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.+?)\s*$").unwrap());

static SCRIPT_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:script|groovy|evaluate)\s*\{").unwrap());

/// Coarse tokenizer for scripts the primary pass could not structure.
///
/// Locates stage-like blocks by keyword/paren/brace heuristics, scans
/// brace-scoped key=value environment assignments, and marks nested
/// script-like sub-blocks as unparsed regions. Confidence is capped below
/// full: the fallback path can never claim it understood everything.
pub fn tokenize(script: &str) -> Extraction {
    let mut features = FeatureSet::default();
    let mut unparsed = Vec::new();
    let mut recognized: BTreeSet<usize> = BTreeSet::new();

    for m in STAGE_LIKE.find_iter(script) {
        let line = line_of(script, m.start());
        log::debug!("fallback: stage-like block at line {line}");
        recognized.insert(line);
    }

    for caps in PLUGIN_LIKE.captures_iter(script) {
        let m = caps.get(0).expect("whole-match group always present");
        recognized.insert(line_of(script, m.start()));
    }

    for caps in ENV_ASSIGN.captures_iter(script) {
        let m = caps.get(0).expect("whole-match group always present");
        let line = line_of(script, m.start());
        recognized.insert(line);
        let key = caps[1].to_string();
        if !features.environment.iter().any(|(k, _)| k == &key) {
            features
                .environment
                .push((key, unquote(caps[2].trim()).to_string()));
        }
    }

    for m in SCRIPT_LIKE.find_iter(script) {
        let brace = m.end() - 1;
        let Some(close) = matching_brace(script, brace) else {
            continue;
        };
        let start_line = line_of(script, m.start());
        let end_line = line_of(script, close);
        for line in start_line..=end_line {
            recognized.remove(&line);
        }
        unparsed.push(UnparsedRegion {
            text: script[m.start()..=close].to_string(),
            start_line,
            end_line,
            reason: MANUAL_REVIEW_REASON.to_string(),
        });
    }

    let confidence = confidence_estimate(script, recognized.len());

    Extraction {
        features,
        confidence,
        unparsed,
    }
}

/// confidence = min(0.9, parsed_fraction + 0.4). A fully unrecognized
/// script still reports 0.4 rather than zero, since the tokenizer itself
/// ran to completion.
fn confidence_estimate(script: &str, recognized_lines: usize) -> f64 {
    let meaningful = script.lines().filter(|l| !l.trim().is_empty()).count();
    let fraction = if meaningful == 0 {
        0.0
    } else {
        recognized_lines as f64 / meaningful as f64
    };
    (fraction + CONFIDENCE_FLOOR_BOOST).min(CONFIDENCE_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn confidence_never_reaches_full() {
        let src = indoc! {"
            node('linux') {
                stage('Build') {
                    sh 'make'
                }
            }
        "};
        let extraction = tokenize(src);
        assert!(extraction.confidence <= 0.9);
        assert!(extraction.confidence >= 0.4);
    }

    #[test]
    fn script_blocks_become_unparsed_regions() {
        let src = indoc! {"
            node {
                script {
                    def v = computeVersion()
                    currentBuild.displayName = v
                }
            }
        "};
        let extraction = tokenize(src);
        assert_eq!(extraction.unparsed.len(), 1);
        let region = &extraction.unparsed[0];
        assert_eq!(region.reason, "requires manual review");
        assert_eq!(region.start_line, 2);
        assert_eq!(region.end_line, 5);
        assert!(region.text.contains("computeVersion"));
    }

    #[test]
    fn brace_scoped_env_assignments_are_recovered() {
        let src = indoc! {"
            node {
                APP = 'svc'
                PORT = 8080
            }
        "};
        let extraction = tokenize(src);
        assert_eq!(
            extraction.features.environment,
            vec![
                ("APP".to_string(), "svc".to_string()),
                ("PORT".to_string(), "8080".to_string()),
            ]
        );
    }

    #[test]
    fn empty_input_gets_floor_confidence() {
        let extraction = tokenize("");
        assert!((extraction.confidence - 0.4).abs() < f64::EPSILON);
        assert!(extraction.unparsed.is_empty());
    }

    #[test]
    fn mostly_recognized_input_caps_at_point_nine() {
        let src = "stage('A') {\nstage('B') {\nstage('C') {";
        let extraction = tokenize(src);
        assert!((extraction.confidence - 0.9).abs() < f64::EPSILON);
    }
}
