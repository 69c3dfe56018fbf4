use sketch_import::services::importer::ProjectImporter;
use sketch_import::utils::config::ImportConfig;
use sketch_import::{CancellationToken, ImportError};
use std::fs;
use tempfile::TempDir;

use crate::fixtures::{write_project, write_project_zip, Defect};

/// Test importing a zip archive whose content sits inside the `_cmake` wrapper
#[test]
fn test_import_wrapped_archive() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let zip = temp_dir.path().join("blink.zip");
    write_project_zip(temp_dir.path(), &zip, Defect::None, "_cmake/");
    let dest = temp_dir.path().join("workspace");

    let summary = ProjectImporter::default()
        .import(&zip, &dest, "blink", None)
        .expect("import should succeed");

    let target = dest.join("blink");
    assert_eq!(summary.target, target);
    assert_eq!(summary.files_copied, 5);
    assert!(target.join("CMakeLists.txt").is_file());
    assert!(target.join("sketch/blink.ino.cpp").is_file());
    assert!(!target.join("_cmake").exists());
}

#[test]
fn test_import_plain_archive() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let zip = temp_dir.path().join("blink.zip");
    write_project_zip(temp_dir.path(), &zip, Defect::None, "");
    let dest = temp_dir.path().join("workspace");

    ProjectImporter::default()
        .import(&zip, &dest, "blink", None)
        .expect("import should succeed");
    assert!(dest.join("blink/core/avr/Arduino.h").is_file());
}

/// Test a custom wrapper directory from configuration
#[test]
fn test_import_with_configured_wrapper() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let zip = temp_dir.path().join("blink.zip");
    write_project_zip(temp_dir.path(), &zip, Defect::None, "export/");
    let dest = temp_dir.path().join("workspace");

    let default_err = ProjectImporter::default()
        .import(&zip, &dest, "blink", None)
        .unwrap_err();
    assert!(default_err.to_string().contains("CMakeLists.txt"));

    let importer = ProjectImporter::new(ImportConfig::new().with_wrapper_dir("export"));
    importer
        .import(&zip, &dest, "blink", None)
        .expect("import should succeed");
    assert!(dest.join("blink/CMakeLists.txt").is_file());
}

/// Test that a failed validation leaves the destination untouched
#[test]
fn test_failed_import_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source = temp_dir.path().join("source");
    write_project(&source, Defect::NoCoreFolder);
    let dest = temp_dir.path().join("workspace");
    fs::create_dir_all(&dest).unwrap();

    let err = ProjectImporter::default()
        .import(&source, &dest, "blink", None)
        .unwrap_err();

    assert_eq!(err.to_string(), "Couldn't find the 'core' folder.");
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
}

#[test]
fn test_import_cancelled() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source = temp_dir.path().join("source");
    write_project(&source, Defect::None);
    let dest = temp_dir.path().join("workspace");

    let token = CancellationToken::new();
    token.cancel();
    let err = ProjectImporter::default()
        .import(&source, &dest, "blink", Some(&token))
        .unwrap_err();

    assert!(matches!(err, ImportError::Cancelled));
    assert!(!dest.join("blink").exists());
}

#[test]
fn test_import_rejects_bad_names() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source = temp_dir.path().join("source");
    write_project(&source, Defect::None);
    let importer = ProjectImporter::default();

    for name in ["", "../escape", "a/b", ".hidden"] {
        let err = importer
            .import(&source, temp_dir.path(), name, None)
            .unwrap_err();
        assert!(matches!(err, ImportError::InvalidArgument(_)), "{name:?}");
    }
}

#[test]
fn test_extraction_released_after_import() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let scratch = temp_dir.path().join("scratch");
    let zip = temp_dir.path().join("blink.zip");
    write_project_zip(temp_dir.path(), &zip, Defect::None, "_cmake/");

    let importer = ProjectImporter::new(ImportConfig::new().with_temp_dir(&scratch));
    importer
        .import(&zip, &temp_dir.path().join("workspace"), "blink", None)
        .expect("import should succeed");

    assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
}
