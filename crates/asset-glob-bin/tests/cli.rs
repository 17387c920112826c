use assert_cmd::Command;
use fs_err::{self as fs, File};
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn fixture() -> TempDir {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();

    fs::create_dir_all(root.join("cmd")).unwrap();
    fs::create_dir_all(root.join("vendor")).unwrap();
    File::create(root.join("main.go")).unwrap();
    File::create(root.join("cmd/tool.go")).unwrap();
    File::create(root.join("vendor/lib.go")).unwrap();
    File::create(root.join("vendor/keep.go")).unwrap();

    temp_dir
}

fn asset_glob(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("asset-glob").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn resolve_with_exclusion() {
    let temp_dir = fixture();

    asset_glob(temp_dir.path())
        .args(["resolve", "**/*.go", "!vendor/**"])
        .assert()
        .success()
        .stdout("cmd/tool.go\nmain.go\n");
}

#[test]
fn resolve_negation_before_inclusion() {
    let temp_dir = fixture();

    asset_glob(temp_dir.path())
        .args(["resolve", "!vendor/**", "vendor/keep.go"])
        .assert()
        .success()
        .stdout("vendor/keep.go\n");
}

#[test]
fn resolve_single_segment_excludes_working_directory() {
    let temp_dir = fixture();

    asset_glob(temp_dir.path())
        .args(["resolve", "*"])
        .assert()
        .success()
        .stdout("cmd\nmain.go\nvendor\n");

    asset_glob(temp_dir.path())
        .args(["resolve", "?"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn resolve_relative_to_pattern_root() {
    let temp_dir = fixture();

    asset_glob(temp_dir.path())
        .args(["resolve", "--relative", "vendor/*.go"])
        .assert()
        .success()
        .stdout("keep.go\nlib.go\n");
}

#[test]
fn resolve_from_directory_flag() {
    let temp_dir = fixture();
    let parent = temp_dir.path().parent().unwrap();

    asset_glob(parent)
        .arg("-C")
        .arg(temp_dir.path())
        .args(["resolve", "*.go"])
        .assert()
        .success()
        .stdout("main.go\n");
}

#[test]
fn resolve_patterns_from_config_file() {
    let temp_dir = fixture();
    fs::write(
        temp_dir.path().join("assets.toml"),
        "patterns = [\"cmd/**\", \"main.go\"]\n\n[walk]\nthreads = 2\n",
    )
    .unwrap();

    asset_glob(temp_dir.path())
        .arg("resolve")
        .assert()
        .success()
        .stdout("cmd/tool.go\nmain.go\n");

    // Patterns on the command line replace the ones from the file.
    asset_glob(temp_dir.path())
        .args(["resolve", "vendor/lib.go"])
        .assert()
        .success()
        .stdout("vendor/lib.go\n");
}

#[test]
fn resolve_as_json() {
    let temp_dir = fixture();

    let output = asset_glob(temp_dir.path())
        .args(["resolve", "--json", "--files-only", "cmd/**"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let assets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        assets,
        serde_json::json!([{
            "path": "cmd/tool.go",
            "pattern_root": "cmd",
            "relative_path": "tool.go",
            "is_dir": false,
            "len": 0,
        }])
    );
}

#[test]
fn resolve_missing_root_fails() {
    let temp_dir = fixture();

    let output = asset_glob(temp_dir.path())
        .args(["resolve", "missing/*.go"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("missing/*.go"), "{stderr}");
}

#[test]
fn resolve_without_patterns_fails() {
    let temp_dir = fixture();

    asset_glob(temp_dir.path()).arg("resolve").assert().failure();
}

#[test]
fn explain_prints_roots_and_expressions() {
    let temp_dir = tempdir().unwrap();

    asset_glob(temp_dir.path())
        .args(["explain", "src/**/*.rs", "!src/gen/**"])
        .assert()
        .success()
        .stdout(
            "src/**/*.rs\n  root:       src\n  expression: ^src/((?:[\\w.\\-]+/)*)[^/]*\\.rs$\n\
             !src/gen/**\n  removes:    paths matched by earlier patterns\n  expression: ^src/gen/.*$\n",
        );
}
