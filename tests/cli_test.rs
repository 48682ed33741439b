use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PIPELINE: &str = r#"pipeline {
    agent any
    environment {
        API_TOKEN = credentials('service-api-token')
    }
    stages {
        stage('Build') {
            steps {
                sh 'make build'
                junit 'reports/*.xml'
            }
        }
    }
}
"#;

fn write_pipeline(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("Jenkinsfile");
    fs::write(&path, PIPELINE).unwrap();
    path
}

#[test]
fn translate_prints_yaml_to_stdout() {
    let dir = TempDir::new().unwrap();
    let script = write_pipeline(&dir);

    Command::cargo_bin("cimorph")
        .unwrap()
        .current_dir(dir.path())
        .args(["translate", script.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("stages:"))
        .stdout(predicate::str::contains("SERVICE_API_TOKEN"));
}

#[test]
fn translate_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let script = write_pipeline(&dir);
    let out = dir.path().join("out/.gitlab-ci.yml");

    Command::cargo_bin("cimorph")
        .unwrap()
        .current_dir(dir.path())
        .args([
            "translate",
            script.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("build-job:"));
}

#[test]
fn translate_json_format_emits_the_full_report() {
    let dir = TempDir::new().unwrap();
    let script = write_pipeline(&dir);

    let output = Command::cargo_bin("cimorph")
        .unwrap()
        .current_dir(dir.path())
        .args(["translate", script.to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report.get("config_text").is_some());
    assert!(report.get("summary").is_some());
    assert!(report.get("specs").is_some());
}

#[test]
fn checklist_reports_the_readiness_score() {
    let dir = TempDir::new().unwrap();
    let script = write_pipeline(&dir);

    Command::cargo_bin("cimorph")
        .unwrap()
        .current_dir(dir.path())
        .args(["checklist", script.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Migration checklist"))
        .stdout(predicate::str::contains("/100"));
}

#[test]
fn vars_writes_template_and_provisioning_script() {
    let dir = TempDir::new().unwrap();
    let script = write_pipeline(&dir);
    let vars_dir = dir.path().join("vars");

    Command::cargo_bin("cimorph")
        .unwrap()
        .current_dir(dir.path())
        .args([
            "vars",
            script.to_str().unwrap(),
            "--dir",
            vars_dir.to_str().unwrap(),
        ])
        .assert()
        .success();

    let template = fs::read_to_string(vars_dir.join("variables.env.template")).unwrap();
    assert!(template.contains("SERVICE_API_TOKEN="));
    let provision = fs::read_to_string(vars_dir.join("provision-variables.sh")).unwrap();
    assert!(provision.contains("glab variable set"));
}

#[test]
fn missing_script_fails_with_context() {
    Command::cargo_bin("cimorph")
        .unwrap()
        .args(["translate", "/nonexistent/Jenkinsfile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading source script"));
}
