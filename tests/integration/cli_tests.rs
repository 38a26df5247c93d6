//! Integration tests for the CLI binary.
//!
//! This test is registered as a [[test]] in the mkm-identity-cli crate
//! so that CARGO_BIN_EXE_mkm is available.

use std::path::PathBuf;
use std::process::Command;

/// Get a Command pointing to the `mkm` binary.
fn mkm_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mkm"))
}

fn hulk_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../mkm-identity/res/mkm_hulk.json")
}

#[test]
fn cli_responds_to_help() {
    let output = mkm_binary()
        .arg("--help")
        .output()
        .expect("failed to execute mkm --help");

    assert!(
        output.status.success(),
        "mkm --help should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage") && stdout.contains("validate"),
        "mkm --help output should contain usage information, got: {stdout}"
    );
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = mkm_binary()
        .arg("--nonexistent-flag")
        .output()
        .expect("failed to execute mkm");

    assert!(
        !output.status.success(),
        "mkm with unknown flag should exit with error"
    );
}

#[test]
fn cli_validates_builtin_fixture() {
    let output = mkm_binary()
        .arg("validate")
        .arg(hulk_fixture())
        .output()
        .expect("failed to execute mkm validate");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "fixture should validate, stdout: {stdout}, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("hulk@4YeVEN3aUnvC1DNUufCq1bs9zoBSJTzVEj"));
    assert!(stdout.contains("valid"));
}

#[test]
fn cli_rejects_tampered_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tampered.json");
    let text = std::fs::read_to_string(hulk_fixture()).unwrap();
    std::fs::write(&path, text.replace("\"seed\" : \"hulk\"", "\"seed\" : \"hulc\"")).unwrap();

    let output = mkm_binary()
        .arg("validate")
        .arg(&path)
        .output()
        .expect("failed to execute mkm validate");

    assert!(!output.status.success(), "tampered fixture must fail");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FAILED"), "got: {stdout}");
}

#[test]
fn cli_parses_identifier() {
    let output = mkm_binary()
        .args(["parse-id", "hulk@4YeVEN3aUnvC1DNUufCq1bs9zoBSJTzVEj/tablet"])
        .output()
        .expect("failed to execute mkm parse-id");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hulk"));
    assert!(stdout.contains("tablet"));
    assert!(stdout.contains("main (0x08)"));
}

#[test]
fn cli_rejects_bad_identifier() {
    let output = mkm_binary()
        .args(["parse-id", "hulk@nowhere"])
        .output()
        .expect("failed to execute mkm parse-id");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error"));
}

#[test]
fn cli_generates_valid_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("titan.json");

    let output = mkm_binary()
        .args(["generate", "--seed", "titan", "--name", "Titan", "--name", "泰坦"])
        .arg("--output")
        .arg(&path)
        .output()
        .expect("failed to execute mkm generate");
    assert!(
        output.status.success(),
        "generate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(path.exists());

    let output = mkm_binary()
        .arg("validate")
        .arg(&path)
        .output()
        .expect("failed to execute mkm validate");
    assert!(output.status.success());
}

#[test]
fn cli_generates_ex_eth_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moky.json");

    let output = mkm_binary()
        .args(["generate", "--meta", "exeth", "--seed", "moky", "--name", "Moky"])
        .arg("--output")
        .arg(&path)
        .output()
        .expect("failed to execute mkm generate");
    assert!(
        output.status.success(),
        "generate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("moky@0x"));

    let output = mkm_binary()
        .arg("validate")
        .arg(&path)
        .output()
        .expect("failed to execute mkm validate");
    assert!(output.status.success());
}

#[test]
fn cli_generate_mkm_without_seed_fails() {
    let output = mkm_binary()
        .args(["generate", "--name", "Nobody"])
        .output()
        .expect("failed to execute mkm generate");
    assert!(!output.status.success());
}

#[test]
fn cli_lists_immortals_from_env_dir() {
    let dir = tempfile::tempdir().unwrap();
    let output = mkm_binary()
        .arg("immortals")
        .env("MKM_FIXTURE_DIR", dir.path())
        .output()
        .expect("failed to execute mkm immortals");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Immortals (1)"));
    assert!(stdout.contains("无敌浩克"));
}
