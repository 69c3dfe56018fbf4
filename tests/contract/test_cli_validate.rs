// Contract test for `sketch-import validate` command

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

use crate::fixtures::{write_project, write_project_zip, Defect};

/// Command isolated from the caller's configuration and log settings
fn sketch_import(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sketch-import").unwrap();
    cmd.env_remove("SKETCH_IMPORT_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home);
    cmd
}

#[test]
fn test_validate_valid_directory() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("blink");
    write_project(&project, Defect::None);

    sketch_import(temp_dir.path())
        .arg("validate")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Project structure is valid"));
}

#[test]
fn test_validate_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("empty");
    std::fs::create_dir_all(&project).unwrap();

    sketch_import(temp_dir.path())
        .arg("validate")
        .arg(&project)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Couldn't find 'CMakeLists.txt' file."));
}

#[test]
fn test_validate_without_path() {
    let temp_dir = TempDir::new().unwrap();

    sketch_import(temp_dir.path())
        .arg("validate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("path must be specified"));
}

#[test]
fn test_validate_missing_path() {
    let temp_dir = TempDir::new().unwrap();

    sketch_import(temp_dir.path())
        .arg("validate")
        .arg(temp_dir.path().join("missing"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_validate_zip_json() {
    let temp_dir = TempDir::new().unwrap();
    let zip = temp_dir.path().join("blink.zip");
    write_project_zip(temp_dir.path(), &zip, Defect::None, "");

    let output = sketch_import(temp_dir.path())
        .args(["validate", "--json"])
        .arg(&zip)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "valid");
    assert_eq!(json["kind"], "archive");
    assert!(json["message"].is_null());
    assert!(json["checked_at"].is_string());
}

#[test]
fn test_validate_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("blink");
    write_project(&project, Defect::NoCoreFolder);

    let output = sketch_import(temp_dir.path())
        .args(["validate", "--json"])
        .arg(&project)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["kind"], "directory");
    assert_eq!(json["error_kind"], "missing_requirement");
    assert_eq!(json["message"], "Couldn't find the 'core' folder.");
}

#[test]
fn test_validate_with_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("blink");
    write_project(&project, Defect::None);

    sketch_import(temp_dir.path())
        .args(["--config"])
        .arg(temp_dir.path().join("absent.toml"))
        .arg("validate")
        .arg(&project)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_validate_with_config_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("blink");
    write_project(&project, Defect::None);

    sketch_import(temp_dir.path())
        .env("SKETCH_IMPORT_CONFIG", temp_dir.path().join("absent.toml"))
        .arg("validate")
        .arg(&project)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_validate_config_flag_overrides_environment() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("blink");
    write_project(&project, Defect::None);
    let config = temp_dir.path().join("config.toml");
    std::fs::write(&config, "log_level = \"info\"\n").unwrap();

    sketch_import(temp_dir.path())
        .env("SKETCH_IMPORT_CONFIG", temp_dir.path().join("absent.toml"))
        .arg("--config")
        .arg(&config)
        .arg("validate")
        .arg(&project)
        .assert()
        .success();
}

#[test]
fn test_validate_verbose_logs_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("blink");
    write_project(&project, Defect::None);

    sketch_import(temp_dir.path())
        .args(["--verbose", "validate"])
        .arg(&project)
        .assert()
        .success()
        .stderr(predicate::str::contains("requirement satisfied"));
}
