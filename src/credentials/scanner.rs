use super::CredentialHit;
use crate::core::BindingKind;
use crate::plugins::signatures::is_skippable_line;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static CREDENTIALS_HELPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"credentials\s*\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());

static BINDING_FORMS: Lazy<Vec<(Regex, BindingKind)>> = Lazy::new(|| {
    let forms = [
        (r#"usernamePassword\s*\([^)]*credentialsId\s*:\s*['"]([^'"]+)['"]"#, BindingKind::UsernamePassword),
        (r#"\bstring\s*\([^)]*credentialsId\s*:\s*['"]([^'"]+)['"]"#, BindingKind::SecretText),
        (r#"\bfile\s*\([^)]*credentialsId\s*:\s*['"]([^'"]+)['"]"#, BindingKind::SecretFile),
        (r#"sshUserPrivateKey\s*\([^)]*credentialsId\s*:\s*['"]([^'"]+)['"]"#, BindingKind::SshKey),
        (r#"certificate\s*\([^)]*credentialsId\s*:\s*['"]([^'"]+)['"]"#, BindingKind::SecretFile),
    ];
    forms
        .into_iter()
        .map(|(pattern, kind)| {
            (
                Regex::new(pattern).expect("binding patterns are fixed at build time"),
                kind,
            )
        })
        .collect()
});

/// Heuristic catch: ALL_CAPS env assignments whose suffix implies secrecy.
static SECRET_SUFFIX_ENV: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*([A-Z][A-Z0-9_]*(?:_SECRET|_TOKEN|_PASSWORD|_PASSWD|_APIKEY|_API_KEY|_CREDENTIALS))\s*=",
    )
    .unwrap()
});

/// Scans the script for credential references using the ordered pattern
/// list: explicit helper call first, typed binding forms, then the
/// secrecy-suffix heuristic. Hits are deduplicated by source id (first
/// occurrence wins) and sorted by line.
pub fn scan(text: &str) -> Vec<CredentialHit> {
    let mut hits: Vec<CredentialHit> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if is_skippable_line(line) {
            continue;
        }
        for caps in CREDENTIALS_HELPER.captures_iter(line) {
            hits.push(hit(&caps, idx, BindingKind::Helper));
        }
        for (regex, kind) in BINDING_FORMS.iter() {
            for caps in regex.captures_iter(line) {
                hits.push(hit(&caps, idx, *kind));
            }
        }
        for caps in SECRET_SUFFIX_ENV.captures_iter(line) {
            // Skip assignments already claimed by the helper form.
            if line.contains("credentials(") {
                continue;
            }
            hits.push(hit(&caps, idx, BindingKind::EnvHeuristic));
        }
    }

    dedup_by_id(hits)
}

fn hit(caps: &regex::Captures, line_idx: usize, kind: BindingKind) -> CredentialHit {
    CredentialHit {
        id: caps[1].to_string(),
        line: line_idx + 1,
        kind,
        matched: caps[0].trim().to_string(),
    }
}

/// First occurrence wins; output sorted by line.
fn dedup_by_id(mut hits: Vec<CredentialHit>) -> Vec<CredentialHit> {
    hits.sort_by_key(|h| h.line);
    let mut seen: HashSet<String> = HashSet::new();
    hits.retain(|h| seen.insert(h.id.clone()));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_credentials_helper_call() {
        let src = "environment {\n  TOKEN = credentials('my-secret-id')\n}";
        let hits = scan(src);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "my-secret-id");
        assert_eq!(hits[0].line, 2);
        assert_eq!(hits[0].kind, BindingKind::Helper);
    }

    #[test]
    fn repeated_id_keeps_earliest_occurrence() {
        let src = indoc! {"
            stage('A') {
                environment { T = credentials('my-secret') }
            }
            stage('B') {
                environment { U = credentials('my-secret') }
                steps { sh 'use' }
            }
            stage('C') {
                environment { V = credentials('my-secret') }
            }
        "};
        let hits = scan(src);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "my-secret");
        assert_eq!(hits[0].line, 2);
    }

    #[test]
    fn typed_binding_forms_carry_their_kind() {
        let src = indoc! {"
            withCredentials([
                usernamePassword(credentialsId: 'db-login', usernameVariable: 'U', passwordVariable: 'P'),
                file(credentialsId: 'kube-config', variable: 'KC'),
                sshUserPrivateKey(credentialsId: 'deploy-key', keyFileVariable: 'K')
            ]) {
                sh './deploy.sh'
            }
        "};
        let hits = scan(src);
        let kinds: Vec<_> = hits.iter().map(|h| (h.id.as_str(), h.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("db-login", BindingKind::UsernamePassword),
                ("kube-config", BindingKind::SecretFile),
                ("deploy-key", BindingKind::SshKey),
            ]
        );
    }

    #[test]
    fn secret_suffix_env_names_are_caught_heuristically() {
        let src = "environment {\n  DEPLOY_TOKEN = \"${params.TOKEN}\"\n  SAFE_FLAG = 'on'\n}";
        let hits = scan(src);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "DEPLOY_TOKEN");
        assert_eq!(hits[0].kind, BindingKind::EnvHeuristic);
    }

    #[test]
    fn helper_and_heuristic_do_not_double_count_one_line() {
        let src = "API_TOKEN = credentials('api-token')";
        let hits = scan(src);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "api-token");
    }

    #[test]
    fn hits_come_back_sorted_by_line() {
        let src = "B_TOKEN = 'x'\nA = credentials('zeta')\nC = credentials('alpha')";
        let hits = scan(src);
        let lines: Vec<_> = hits.iter().map(|h| h.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn commented_references_are_skipped() {
        let src = "// TOKEN = credentials('ghost')\nREAL = credentials('real')";
        let hits = scan(src);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "real");
    }

    #[test]
    fn block_comment_continuation_lines_are_skipped() {
        let src = indoc! {"
            /*
             * TOKEN = credentials('ghost')
             */
            REAL = credentials('real')
        "};
        let hits = scan(src);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "real");
    }

    #[test]
    fn empty_input_yields_no_hits() {
        assert!(scan("").is_empty());
    }
}
