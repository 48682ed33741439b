use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Alias table collapsing synonymous call forms into one canonical id.
/// Applied to every match at scan time, before dedup, so downstream code
/// only ever sees canonical ids.
static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("docker", "docker"),
        ("docker.build", "docker"),
        ("docker.image", "docker"),
        ("docker.withRegistry", "docker"),
        ("docker.withServer", "docker"),
        ("dockerfile", "docker"),
        ("kubernetesDeploy", "kubernetes"),
        ("withKubeConfig", "kubernetes"),
        ("kubectl", "kubernetes"),
        ("junit", "junit"),
        ("archiveArtifacts", "artifacts"),
        ("archive", "artifacts"),
        ("slackSend", "slack"),
        ("emailext", "email"),
        ("mail", "email"),
        ("withSonarQubeEnv", "sonar"),
        ("waitForQualityGate", "sonar"),
        ("sshagent", "ssh"),
        ("sshPublisher", "ssh"),
        ("sshCommand", "ssh"),
        ("publishHTML", "html-publisher"),
        ("timestamps", "timestamps"),
        ("ansiColor", "ansicolor"),
        ("checkout", "git"),
        ("git", "git"),
        ("stash", "stash"),
        ("unstash", "stash"),
        ("input", "input"),
        ("lock", "lock"),
        ("milestone", "milestone"),
        ("build", "build-trigger"),
        ("cleanWs", "workspace-cleanup"),
        ("deleteDir", "workspace-cleanup"),
        ("httpRequest", "http-request"),
    ])
});

/// Canonical id for a matched token. Unknown tokens canonicalize to a
/// lowercased, dot-free form of themselves so dedup still collapses
/// repeated uses.
pub fn canonicalize(token: &str) -> String {
    if let Some(id) = ALIASES.get(token) {
        return (*id).to_string();
    }
    // Method-style tokens share the receiver's canonical id.
    if let Some(receiver) = token.split('.').next() {
        if receiver != token {
            if let Some(id) = ALIASES.get(receiver) {
                return (*id).to_string();
            }
        }
    }
    token.to_lowercase().replace('.', "-")
}
