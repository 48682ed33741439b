use super::MatchConfidence;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// One entry in the ordered signature table. The capturing group, when
/// present, is the token handed to alias canonicalization; otherwise the
/// whole match is used.
pub struct Signature {
    pub regex: Regex,
    pub confidence: MatchConfidence,
}

/// Ordered signature table: specific high-confidence patterns first, a
/// generic call-looking catch-all last. Order matters — the first signature
/// to claim a token on a line wins.
pub static SIGNATURES: Lazy<Vec<Signature>> = Lazy::new(|| {
    let high = [
        r"\b(docker\.\w+)\s*\(",
        r"\b(dockerfile)\b",
        r"\b(kubernetesDeploy|withKubeConfig|kubectl)\b",
        r"\b(junit)\s+['\x22]",
        r"\b(archiveArtifacts)\b",
        r"\b(slackSend)\b",
        r"\b(emailext)\b",
        r"\b(mail)\s+(?:to|subject)\s*:",
        r"\b(withSonarQubeEnv|waitForQualityGate)\b",
        r"\b(sshagent|sshPublisher|sshCommand)\b",
        r"\b(publishHTML)\b",
        r"\b(timestamps)\s*\(\s*\)",
        r"\b(ansiColor)\b",
        r"\b(checkout)\s+scm\b",
        r"\b(stash|unstash)\s+(?:name\s*:|includes\s*:|['\x22])",
        r"\b(input)\s+(?:message\s*:|['\x22])",
        r"\b(build)\s+job\s*:",
        r"\b(lock|milestone)\s*\(",
        r"\b(cleanWs|deleteDir)\s*\(\s*\)",
        r"\b(httpRequest)\b",
    ];
    let medium = [
        r"\b(git)\s+(?:url\s*:|branch\s*:|['\x22]http)",
        r"\b(publishHTML|xunit|cobertura|jacoco)\s*[(\[]",
    ];
    let low = [
        // Generic catch-all: a call-looking leading identifier. Claims
        // anything step-shaped the specific patterns did not.
        r"(?m)^\s*([a-z][A-Za-z0-9]*)\s*(?:\(|\s+['\x22])",
    ];

    let compile = |patterns: &[&str], confidence: MatchConfidence| {
        patterns
            .iter()
            .map(|p| Signature {
                regex: Regex::new(p).expect("signature patterns are fixed at build time"),
                confidence,
            })
            .collect::<Vec<_>>()
    };

    let mut table = compile(&high, MatchConfidence::High);
    table.extend(compile(&medium, MatchConfidence::Medium));
    table.extend(compile(&low, MatchConfidence::Low));
    table
});

/// Structural keywords and shell-tool names that must never register as
/// capability hits. Without this list the generic catch-all would flag
/// half the pipeline skeleton.
static EXCLUDED_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        // Structural keywords of the source DSL.
        "pipeline", "agent", "stages", "stage", "steps", "post", "environment", "options",
        "parameters", "triggers", "tools", "when", "parallel", "matrix", "axes", "axis", "script",
        "node", "expression", "branch", "label", "image", "args", "name", "values", "always",
        "success", "failure",
        "unstable", "changed", "aborted", "cleanup", "retry", "timeout", "buildDiscarder",
        "logRotator", "allOf", "anyOf", "not", "beforeAgent", "cron", "pollSCM",
        // Credential constructs belong to the credential resolver.
        "credentials", "withCredentials", "usernamePassword", "string", "file",
        "sshUserPrivateKey", "certificate", "booleanParam", "choice", "password", "text",
        // Shell tools and script-language noise.
        "sh", "bat", "powershell", "echo", "println", "sleep", "error", "def", "if", "else",
        "for", "while", "return", "curl", "wget", "make", "mvn", "gradle", "npm", "yarn", "pip",
        "tar", "cp", "mv", "rm", "cd", "ls", "env", "params",
    ])
});

pub fn is_excluded(token: &str) -> bool {
    EXCLUDED_TOKENS.contains(token)
}

/// Lines the scanner skips outright.
pub fn is_skippable_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty()
        || trimmed.starts_with("//")
        || trimmed.starts_with('#')
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_signatures_precede_the_catch_all() {
        let last = SIGNATURES.last().unwrap();
        assert_eq!(last.confidence, MatchConfidence::Low);
        assert!(SIGNATURES[..SIGNATURES.len() - 1]
            .iter()
            .all(|s| s.confidence > MatchConfidence::Low));
    }

    #[test]
    fn structural_keywords_are_excluded() {
        for token in ["pipeline", "stage", "steps", "when", "sh", "echo"] {
            assert!(is_excluded(token), "{token} should be excluded");
        }
        assert!(!is_excluded("slackSend"));
    }

    #[test]
    fn comment_and_blank_lines_are_skippable() {
        assert!(is_skippable_line("   // archiveArtifacts 'x'"));
        assert!(is_skippable_line("# junit"));
        assert!(is_skippable_line("  * docs line"));
        assert!(is_skippable_line(""));
        assert!(!is_skippable_line("junit 'reports/*.xml'"));
    }
}
