//! CLI interface tests

#![expect(clippy::unwrap_used, reason = "This is a test module")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = r#"
request-id: "{{SERVICE}}"
deploy-id: "{{BUILD}}"
request-type: SERVICE
owners:
  - ops@example.com
resources:
  cpus: 0.5
  memory-mb: 256
  num-ports: 1
container-info:
  type: DOCKER
  docker:
    image: "registry.example.com/{{SERVICE}}:{{BUILD}}"
"#;

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("singularity-gen"));
}

#[test]
fn test_help_flag() {
    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generate Singularity request and deploy JSON",
        ));
}

#[test]
fn test_missing_config_error() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--config-file")
        .arg("nonexistent.yml")
        .assert()
        .failure()
        .code(2) // Read error
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_malformed_var_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("singularity.yml"), CONFIG).unwrap();

    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--var")
        .arg("SERVICE")
        .assert()
        .failure()
        .code(1) // Override error
        .stderr(predicate::str::contains("There were not two parts to the var"));

    assert!(!temp_dir.path().join("singularity-request.json").exists());
}

#[test]
fn test_invalid_yaml_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invalid.yml");

    fs::write(&config_path, "request-id: web\nowners: [\n").unwrap();

    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--config-file")
        .arg(config_path.to_str().unwrap())
        .assert()
        .failure()
        .code(3) // Parse error
        .stderr(predicate::str::contains("Unable to unmarshal YAML"));

    assert!(!temp_dir.path().join("singularity-request.json").exists());
    assert!(!temp_dir.path().join("singularity-deploy.json").exists());
}

#[test]
fn test_writes_both_documents() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("singularity.yml"), CONFIG).unwrap();

    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--var")
        .arg("SERVICE=web")
        .arg("--var")
        .arg("BUILD=42")
        .assert()
        .success();

    let request: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(temp_dir.path().join("singularity-request.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(request["id"], "web");
    assert_eq!(request["owners"][0], "ops@example.com");

    let deploy: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(temp_dir.path().join("singularity-deploy.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(deploy["deploy"]["id"], "42");
    assert_eq!(
        deploy["deploy"]["containerInfo"]["docker"]["image"],
        "registry.example.com/web:42"
    );
}

#[test]
fn test_output_dir_is_created() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("singularity.yml");
    let output_dir = temp_dir.path().join("out/json");
    fs::write(&config_path, "request-id: web\ndeploy-id: '1'\n").unwrap();

    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.arg("--config-file")
        .arg(config_path.to_str().unwrap())
        .arg("--output-dir")
        .arg(output_dir.to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("File created"));

    assert!(output_dir.join("singularity-request.json").exists());
    assert!(output_dir.join("singularity-deploy.json").exists());
}

#[test]
fn test_dry_run_prints_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("singularity.yml"), CONFIG).unwrap();

    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--dry-run")
        .arg("--var")
        .arg("SERVICE=web")
        .arg("--var")
        .arg("BUILD=42")
        .assert()
        .success()
        .stderr(predicate::str::contains("Dry run preview"))
        .stdout(predicate::str::contains("Dry run preview").not())
        .stdout(predicate::str::contains(r#""requestId": "web""#));

    assert!(!temp_dir.path().join("singularity-request.json").exists());
    assert!(!temp_dir.path().join("singularity-deploy.json").exists());
}

#[test]
fn test_debug_flag_logs_stages() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("singularity.yml"), "request-id: web\n").unwrap();

    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.current_dir(temp_dir.path())
        .env_remove("RUST_LOG")
        .arg("--debug")
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unmarshalled config"));
}

#[test]
fn test_dry_run_stdout_is_only_json() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("singularity.yml"), CONFIG).unwrap();

    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    let output = cmd
        .current_dir(temp_dir.path())
        .env_remove("RUST_LOG")
        .arg("--debug")
        .arg("--dry-run")
        .arg("--var")
        .arg("SERVICE=web")
        .arg("--var")
        .arg("BUILD=42")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let documents = serde_json::Deserializer::from_str(&stdout)
        .into_iter::<serde_json::Value>()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["id"], "web");
    assert_eq!(documents[1]["deploy"]["id"], "42");
}

#[test]
fn test_single_dash_long_options() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.yml");
    fs::write(&config_path, CONFIG).unwrap();

    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.current_dir(temp_dir.path())
        .env_remove("RUST_LOG")
        .arg("-debug")
        .arg("-config-file")
        .arg(config_path.to_str().unwrap())
        .arg("-var")
        .arg("SERVICE=web")
        .arg("-var=BUILD=42")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unmarshalled config"));

    let deploy: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(temp_dir.path().join("singularity-deploy.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(deploy["deploy"]["requestId"], "web");
    assert_eq!(deploy["deploy"]["id"], "42");
}

#[test]
fn test_non_finite_resources_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("singularity.yml"),
        "request-id: a\ndeploy-id: b\nresources:\n  cpus: .nan\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.current_dir(temp_dir.path())
        .assert()
        .failure()
        .code(3) // Parse error
        .stderr(predicate::str::contains("expected a finite number"));

    assert!(!temp_dir.path().join("singularity-request.json").exists());
    assert!(!temp_dir.path().join("singularity-deploy.json").exists());
}

#[test]
fn test_output_dir_that_is_a_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("singularity.yml"), "request-id: web\n").unwrap();
    fs::write(temp_dir.path().join("out"), "").unwrap();

    let mut cmd = Command::cargo_bin("singularity-gen").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--output-dir")
        .arg("out")
        .assert()
        .failure()
        .code(6) // Write error
        .stderr(predicate::str::contains("Output path is not a directory"));
}
