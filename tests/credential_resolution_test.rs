use cimorph::credentials::sanitize::sanitize_key;
use cimorph::{
    resolve_credentials, scan_credentials, validate_specs, CredentialHit, BindingKind,
    ResolveOptions,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use regex::Regex;

fn resolve_script(script: &str) -> Vec<cimorph::VariableSpec> {
    let hits = scan_credentials(script);
    resolve_credentials(&hits, &ResolveOptions::default())
}

#[test]
fn single_helper_call_resolves_to_sanitized_key() {
    let script = "environment { SECRET = credentials('my-secret-id') }";
    let hits = scan_credentials(script);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "my-secret-id");

    let specs = resolve_credentials(&hits, &ResolveOptions::default());
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].key, "MY_SECRET_ID");
}

#[test]
fn repeated_reference_across_stages_keeps_earliest() {
    let script = indoc! {"
        stage('Build') {
            environment { A = credentials('my-secret') }
        }
        stage('Deploy') {
            environment { B = credentials('my-secret') }
            steps {
                sh 'echo deploying'
            }
        }
        stage('Verify') {
            environment { C = credentials('my-secret') }
        }
    "};
    let hits = scan_credentials(script);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "my-secret");
    assert_eq!(hits[0].line, 2);
}

#[test]
fn reserved_prefix_id_errors_and_gets_application_marker() {
    assert_eq!(sanitize_key("CI_SECRET"), "APP_CI_SECRET");

    let specs = resolve_script("environment { X = credentials('CI_SECRET') }");
    assert_eq!(specs[0].key, "APP_CI_SECRET");

    let report = validate_specs(&specs);
    // Sanitization already rewrote the key, so the reserved-prefix finding
    // surfaces as a warning on the source id.
    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("reserved prefix")));
}

#[test]
fn composite_id_expands_to_masked_user_and_pass() {
    let specs = resolve_script("environment { D = credentials('docker-hub-creds') }");
    assert_eq!(specs.len(), 2);
    assert!(specs.iter().any(|s| s.key.contains("USER")));
    assert!(specs.iter().any(|s| s.key.contains("PASS")));
    assert!(specs.iter().all(|s| s.masked));
    // The parent spec is never emitted alongside the expansion.
    assert!(specs.iter().all(|s| s.key != "DOCKER_HUB_CREDS"));
}

#[test]
fn at_most_one_spec_per_proposed_key() {
    let script = indoc! {"
        environment {
            A = credentials('api token')
            B = credentials('api-token')
            C = credentials('API_TOKEN')
        }
    "};
    let specs = resolve_script(script);
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].key, "API_TOKEN");
    assert_eq!(specs[0].source_id, "api token");
}

proptest! {
    #[test]
    fn sanitized_keys_always_match_the_grammar(raw in ".{0,64}") {
        let key = sanitize_key(&raw);
        let grammar = Regex::new(r"^[A-Z_][A-Z0-9_]*$").unwrap();
        prop_assert!(grammar.is_match(&key), "bad key {key:?} from {raw:?}");
    }

    #[test]
    fn sanitized_keys_never_start_with_the_bare_reserved_prefix(raw in "[a-zA-Z_ -]{0,32}") {
        let key = sanitize_key(&raw);
        prop_assert!(!key.starts_with("CI_"), "key {key:?} kept the reserved prefix");
    }

    #[test]
    fn resolution_is_total_over_arbitrary_hits(id in "[a-zA-Z0-9_.-]{1,40}", line in 1usize..5000) {
        let hits = vec![CredentialHit {
            id: id.clone(),
            line,
            kind: BindingKind::Helper,
            matched: id,
        }];
        let specs = resolve_credentials(&hits, &ResolveOptions::default());
        prop_assert!(!specs.is_empty());
        let report = validate_specs(&specs);
        prop_assert!(report.errors.is_empty(), "errors: {:?}", report.errors);
    }
}
