#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::BLOG_DRAFT;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const EXE: &str = env!("CARGO_BIN_EXE_blueprint-apigen");

#[test]
fn test_cli_generate_writes_artifacts() {
    let dir = tempdir().unwrap();
    let draft = dir.path().join("draft.yaml");
    fs::write(&draft, BLOG_DRAFT).unwrap();

    let output = Command::new(EXE)
        .arg("generate")
        .arg("--draft")
        .arg(&draft)
        .arg("--output")
        .arg(dir.path())
        .arg("--timestamp")
        .arg("2025-12-12T05:32:50Z")
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("API Controller"));
    assert!(stdout.contains("PostData.php"));
    assert!(dir.path().join("app/Http/Controllers/Api/PostController.php").exists());
    assert!(dir.path().join("app/Data/TagData.php").exists());
}

#[test]
fn test_cli_generate_only_data_with_config() {
    let dir = tempdir().unwrap();
    let draft = dir.path().join("draft.yaml");
    fs::write(&draft, BLOG_DRAFT).unwrap();
    fs::write(
        dir.path().join("apigen.toml"),
        "namespace = \"Blog\"\napp_path = \"src\"\n",
    )
    .unwrap();

    let status = Command::new(EXE)
        .args(["generate", "--only", "data", "--draft"])
        .arg(&draft)
        .arg("--output")
        .arg(dir.path())
        .status()
        .expect("run cli");
    assert!(status.success());

    let php = fs::read_to_string(dir.path().join("src/Data/PostData.php")).unwrap();
    assert!(php.contains("namespace Blog\\Data;"));
    assert!(php.contains("use Blog\\Enums\\Status;"));
    assert!(!dir.path().join("src/Http").exists());
}

#[test]
fn test_cli_inspect_prints_json() {
    let dir = tempdir().unwrap();
    let draft = dir.path().join("draft.yaml");
    fs::write(&draft, BLOG_DRAFT).unwrap();

    let output = Command::new(EXE)
        .args(["inspect", "--draft"])
        .arg(&draft)
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["Tag"]["sorts"],
        serde_json::json!(["created_at", "title", "id"])
    );
    assert_eq!(
        json["Post"]["includes"],
        serde_json::json!(["user", "comments", "tags"])
    );
}

#[test]
fn test_cli_delete_resource_requires_yes() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("app/Data/TagData.php");
    fs::create_dir_all(data.parent().unwrap()).unwrap();
    fs::write(&data, "<?php").unwrap();

    let status = Command::new(EXE)
        .args(["delete-resource", "Tag", "--root"])
        .arg(dir.path())
        .status()
        .expect("run cli");
    assert!(status.success());
    assert!(data.exists());

    let output = Command::new(EXE)
        .args(["delete-resource", "Tag", "--yes", "--root"])
        .arg(dir.path())
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert!(!data.exists());
    assert!(String::from_utf8_lossy(&output.stdout).contains("MANUAL CLEANUP REQUIRED"));
}

#[test]
fn test_cli_missing_draft_fails() {
    let dir = tempdir().unwrap();
    let status = Command::new(EXE)
        .args(["generate", "--draft"])
        .arg(dir.path().join("missing.yaml"))
        .status()
        .expect("run cli");
    assert!(!status.success());
}
