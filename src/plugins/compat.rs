use crate::core::SupportTier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One row of the capability compatibility table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatEntry {
    pub tier: SupportTier,
    #[serde(default)]
    pub equivalent: Option<String>,
    #[serde(default)]
    pub include_ref: Option<String>,
    pub note: String,
    #[serde(default)]
    pub doc_url: Option<String>,
    #[serde(default)]
    pub alternative: Option<String>,
}

/// Immutable canonical-id -> compatibility lookup, injected into the
/// engine at construction. Misses are resolved conservatively by the
/// caller, never fabricated here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompatibilityTable {
    entries: HashMap<String, CompatEntry>,
}

impl CompatibilityTable {
    pub fn lookup(&self, canonical_id: &str) -> Option<&CompatEntry> {
        self.entries.get(canonical_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads a TOML override table and merges it over this one. Overriding
    /// rows replace built-in rows with the same id.
    pub fn merge_from_toml(mut self, path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let overrides: HashMap<String, CompatEntry> = toml::from_str(&text)?;
        self.entries.extend(overrides);
        Ok(self)
    }

    /// Built-in table covering the common plugin surface of the source
    /// ecosystem.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        let mut add = |id: &str, entry: CompatEntry| {
            entries.insert(id.to_string(), entry);
        };

        add(
            "docker",
            CompatEntry {
                tier: SupportTier::Native,
                equivalent: Some("image: with docker:dind service".to_string()),
                include_ref: None,
                note: "Container builds map to a docker-in-docker job".to_string(),
                doc_url: Some("https://docs.gitlab.com/ee/ci/docker/using_docker_build.html".to_string()),
                alternative: Some("kaniko for daemonless builds".to_string()),
            },
        );
        add(
            "kubernetes",
            CompatEntry {
                tier: SupportTier::Templated,
                equivalent: Some("kubectl apply in a deploy job".to_string()),
                include_ref: Some("Jobs/Deploy.gitlab-ci.yml".to_string()),
                note: "Use the GitLab agent for Kubernetes or kubectl with a KUBECONFIG variable"
                    .to_string(),
                doc_url: Some("https://docs.gitlab.com/ee/user/clusters/agent/".to_string()),
                alternative: None,
            },
        );
        add(
            "junit",
            CompatEntry {
                tier: SupportTier::Native,
                equivalent: Some("artifacts:reports:junit".to_string()),
                include_ref: None,
                note: "Test reports upload natively from the test job".to_string(),
                doc_url: Some(
                    "https://docs.gitlab.com/ee/ci/testing/unit_test_reports.html".to_string(),
                ),
                alternative: None,
            },
        );
        add(
            "artifacts",
            CompatEntry {
                tier: SupportTier::Native,
                equivalent: Some("artifacts:paths".to_string()),
                include_ref: None,
                note: "Archived files become job artifacts".to_string(),
                doc_url: Some("https://docs.gitlab.com/ee/ci/jobs/job_artifacts.html".to_string()),
                alternative: None,
            },
        );
        add(
            "slack",
            CompatEntry {
                tier: SupportTier::Templated,
                equivalent: Some("Slack integration or webhook call in after_script".to_string()),
                include_ref: None,
                note: "Configure the project-level Slack integration; per-job messages need a webhook".to_string(),
                doc_url: Some("https://docs.gitlab.com/ee/user/project/integrations/slack.html".to_string()),
                alternative: None,
            },
        );
        add(
            "email",
            CompatEntry {
                tier: SupportTier::Limited,
                equivalent: Some("pipeline email notifications".to_string()),
                include_ref: None,
                note: "Built-in notifications cover failures only; custom templates are not supported".to_string(),
                doc_url: None,
                alternative: Some("a notification job calling an SMTP relay".to_string()),
            },
        );
        add(
            "sonar",
            CompatEntry {
                tier: SupportTier::Templated,
                equivalent: Some("sonar-scanner job with SONAR_TOKEN".to_string()),
                include_ref: Some("Jobs/Code-Quality.gitlab-ci.yml".to_string()),
                note: "SonarQube publishes a scanner CLI template for GitLab".to_string(),
                doc_url: Some("https://docs.sonarsource.com/sonarqube/latest/analyzing-source-code/ci-integration/gitlab-integration/".to_string()),
                alternative: None,
            },
        );
        add(
            "git",
            CompatEntry {
                tier: SupportTier::Native,
                equivalent: Some("implicit repository clone".to_string()),
                include_ref: None,
                note: "Runners clone the repository before every job; explicit checkout is unnecessary".to_string(),
                doc_url: None,
                alternative: None,
            },
        );
        add(
            "ssh",
            CompatEntry {
                tier: SupportTier::Templated,
                equivalent: Some("ssh-agent in before_script with an SSH_PRIVATE_KEY variable".to_string()),
                include_ref: None,
                note: "Load the key from a file-type CI variable and start ssh-agent manually".to_string(),
                doc_url: Some("https://docs.gitlab.com/ee/ci/ssh_keys/".to_string()),
                alternative: None,
            },
        );
        add(
            "html-publisher",
            CompatEntry {
                tier: SupportTier::Limited,
                equivalent: Some("artifacts:paths with browsable artifacts".to_string()),
                include_ref: None,
                note: "No in-pipeline HTML report tab; artifacts browser or Pages instead".to_string(),
                doc_url: None,
                alternative: Some("GitLab Pages for persistent reports".to_string()),
            },
        );
        add(
            "timestamps",
            CompatEntry {
                tier: SupportTier::Native,
                equivalent: Some("job log timestamps".to_string()),
                include_ref: None,
                note: "Job logs are timestamped by the runner".to_string(),
                doc_url: None,
                alternative: None,
            },
        );
        add(
            "ansicolor",
            CompatEntry {
                tier: SupportTier::Native,
                equivalent: Some("ANSI color in job logs".to_string()),
                include_ref: None,
                note: "Color output renders without any wrapper".to_string(),
                doc_url: None,
                alternative: None,
            },
        );
        add(
            "stash",
            CompatEntry {
                tier: SupportTier::Limited,
                equivalent: Some("artifacts between jobs".to_string()),
                include_ref: None,
                note: "No scoped stash; pass files as artifacts or cache".to_string(),
                doc_url: None,
                alternative: Some("cache: for dependency directories".to_string()),
            },
        );
        add(
            "input",
            CompatEntry {
                tier: SupportTier::Templated,
                equivalent: Some("when: manual".to_string()),
                include_ref: None,
                note: "Manual jobs pause the pipeline for approval".to_string(),
                doc_url: Some("https://docs.gitlab.com/ee/ci/jobs/job_control.html".to_string()),
                alternative: None,
            },
        );
        add(
            "build-trigger",
            CompatEntry {
                tier: SupportTier::Native,
                equivalent: Some("trigger: for downstream pipelines".to_string()),
                include_ref: None,
                note: "Downstream jobs become trigger jobs".to_string(),
                doc_url: Some("https://docs.gitlab.com/ee/ci/pipelines/downstream_pipelines.html".to_string()),
                alternative: None,
            },
        );
        add(
            "lock",
            CompatEntry {
                tier: SupportTier::Templated,
                equivalent: Some("resource_group".to_string()),
                include_ref: None,
                note: "resource_group serializes jobs over a shared resource".to_string(),
                doc_url: Some("https://docs.gitlab.com/ee/ci/resource_groups/".to_string()),
                alternative: None,
            },
        );
        add(
            "milestone",
            CompatEntry {
                tier: SupportTier::Unsupported,
                equivalent: None,
                include_ref: None,
                note: "No direct equivalent for milestone ordering".to_string(),
                doc_url: None,
                alternative: Some("interruptible: true to cancel superseded pipelines".to_string()),
            },
        );
        add(
            "workspace-cleanup",
            CompatEntry {
                tier: SupportTier::Native,
                equivalent: Some("ephemeral job workspaces".to_string()),
                include_ref: None,
                note: "Runner workspaces are per-job; explicit cleanup is rarely needed".to_string(),
                doc_url: None,
                alternative: None,
            },
        );
        add(
            "http-request",
            CompatEntry {
                tier: SupportTier::Limited,
                equivalent: Some("curl in script".to_string()),
                include_ref: None,
                note: "No typed HTTP step; shell out to curl".to_string(),
                doc_url: None,
                alternative: None,
            },
        );

        CompatibilityTable { entries }
    }
}
