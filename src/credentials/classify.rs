use super::sanitize::{dedup_by_key, sanitize_key};
use super::{CredentialHit, ResolveOptions, SecretClass, ValueKind, VariableSpec};
use crate::core::BindingKind;

/// Ordered type-inference classifiers over the lowercased source id.
/// The order is load-bearing: an id matching both a paired-credential
/// pattern and a generic-token pattern resolves via whichever classifier
/// is checked first, not whichever looks more specific.
const CLASSIFIERS: &[(SecretClass, &[&str])] = &[
    (
        SecretClass::PairedCredentials,
        &["userpass", "user-pass", "username", "login", "creds", "credential"],
    ),
    (
        SecretClass::Registry,
        &["registry", "docker", "dockerhub", "nexus", "artifactory", "quay", "ecr", "harbor"],
    ),
    (
        SecretClass::Token,
        &["token", "apikey", "api-key", "api_key", "auth", "bearer", "oauth"],
    ),
    (
        SecretClass::FileBearing,
        &["file", "kubeconfig", "config", "json", "keystore", "cert", "pem", "p12"],
    ),
    (
        SecretClass::SshKey,
        &["ssh", "private-key", "privatekey", "deploy-key", "deploykey"],
    ),
    (
        SecretClass::Database,
        &["database", "db-", "-db", "mysql", "postgres", "mongo", "jdbc", "sql"],
    ),
    (
        SecretClass::CloudProvider,
        &["aws", "gcp", "azure", "cloud", "s3-"],
    ),
];

/// Infers the secret class: name heuristics in fixed priority order, then
/// the binding-kind default, then the generic secret-text fallback.
pub fn classify(id: &str, kind: BindingKind) -> SecretClass {
    let lower = id.to_lowercase();
    for (class, needles) in CLASSIFIERS {
        if needles.iter().any(|needle| lower.contains(needle)) {
            return *class;
        }
    }
    binding_default(kind)
}

fn binding_default(kind: BindingKind) -> SecretClass {
    match kind {
        BindingKind::UsernamePassword => SecretClass::PairedCredentials,
        BindingKind::SecretFile => SecretClass::FileBearing,
        BindingKind::SshKey => SecretClass::SshKey,
        BindingKind::Helper | BindingKind::SecretText | BindingKind::EnvHeuristic => {
            SecretClass::Generic
        }
    }
}

/// Resolves credential hits into target variable specs. Composite classes
/// expand into child specs inheriting masked/protected/scope; the parent
/// spec is never emitted when expansion occurs. The final set is
/// deduplicated by proposed key, first occurrence winning.
pub fn resolve(hits: &[CredentialHit], options: &ResolveOptions) -> Vec<VariableSpec> {
    let specs: Vec<VariableSpec> = hits
        .iter()
        .map(|hit| build_spec(hit, options))
        .flat_map(|spec| {
            if spec.children.is_empty() {
                vec![spec]
            } else {
                spec.children
            }
        })
        .collect();

    dedup_by_key(specs)
}

fn build_spec(hit: &CredentialHit, options: &ResolveOptions) -> VariableSpec {
    let class = classify(&hit.id, hit.kind);
    let base_key = sanitize_key(&hit.id);
    let (value_kind, masked) = match class {
        SecretClass::FileBearing | SecretClass::SshKey => (ValueKind::File, false),
        _ => (ValueKind::Text, true),
    };

    let mut spec = VariableSpec {
        source_id: hit.id.clone(),
        key: base_key.clone(),
        value_kind,
        masked,
        protected: options.protected,
        scope: options.scope.clone(),
        description: describe(class, &hit.id),
        class,
        children: Vec::new(),
    };

    spec.children = match class {
        SecretClass::PairedCredentials | SecretClass::Registry => {
            expand(&spec, &base_key, &[("USER", "username"), ("PASS", "password")])
        }
        SecretClass::Database => expand(
            &spec,
            &base_key,
            &[
                ("USER", "database username"),
                ("PASS", "database password"),
                ("URL", "connection string"),
            ],
        ),
        _ => Vec::new(),
    };

    spec
}

/// Children suffix the sanitized base key and inherit masked, protected
/// and scope from the parent.
fn expand(parent: &VariableSpec, base_key: &str, parts: &[(&str, &str)]) -> Vec<VariableSpec> {
    parts
        .iter()
        .map(|(suffix, what)| VariableSpec {
            source_id: parent.source_id.clone(),
            key: format!("{base_key}_{suffix}"),
            value_kind: parent.value_kind,
            masked: parent.masked,
            protected: parent.protected,
            scope: parent.scope.clone(),
            description: format!("{} ({})", parent.description, what),
            class: parent.class,
            children: Vec::new(),
        })
        .collect()
}

fn describe(class: SecretClass, id: &str) -> String {
    match class {
        SecretClass::PairedCredentials => format!("Paired credentials from '{id}'"),
        SecretClass::Registry => format!("Registry login from '{id}'"),
        SecretClass::Token => format!("API token from '{id}'"),
        SecretClass::FileBearing => format!("Secret file from '{id}'"),
        SecretClass::SshKey => format!("SSH private key from '{id}'"),
        SecretClass::Database => format!("Database credentials from '{id}'"),
        SecretClass::CloudProvider => format!("Cloud provider secret from '{id}'"),
        SecretClass::Generic => format!("Secret from '{id}'"),
    }
}
