//! CLI integration tests.
//!
//! Tests the command-line interface by running the binary as a subprocess.

mod common;

use std::fs;
use std::process::Command;

use common::{create_temp_file, SAMPLE_BIB};

fn publist() -> Command {
    Command::new(env!("CARGO_BIN_EXE_publist"))
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid JSON ({}): {}", e, stdout))
}

// ============================================
// Tests for CLI argument parsing
// ============================================

#[test]
fn test_cli_help() {
    let output = publist().arg("--help").output().expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("publist") || stdout.contains("publication"),
        "Help should mention the tool name or purpose: {}",
        stdout
    );
    assert!(output.status.success(), "Help should exit with success");
}

#[test]
fn test_cli_build_subcommand_help() {
    let output = publist()
        .args(["build", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--bib"), "Build help should mention --bib: {}", stdout);
    assert!(stdout.contains("--style"), "Build help should mention --style: {}", stdout);
    assert!(output.status.success());
}

#[test]
fn test_cli_styles_lists_builtins() {
    let output = publist().arg("styles").output().expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["minimal", "numeric", "author-date", "citation-only"] {
        assert!(stdout.lines().any(|l| l == name), "missing style {}: {}", name, stdout);
    }
    assert!(output.status.success());
}

// ============================================
// Tests for build command
// ============================================

#[test]
fn test_cli_build_basic() {
    // Given: a BibTeX file
    let bib = create_temp_file(SAMPLE_BIB, ".bib");

    // When: we build with a builtin style, sorted by key
    let output = publist()
        .args([
            "build",
            "--bib",
            bib.path().to_str().unwrap(),
            "--style",
            "numeric",
            "--sort",
            "key",
        ])
        .output()
        .expect("Failed to execute command");

    // Then: the context JSON holds all three publications in key order
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let context = stdout_json(&output);
    let list = context["publications"].as_array().unwrap();
    let keys: Vec<&str> = list.iter().map(|p| p["key"].as_str().unwrap()).collect();
    assert_eq!(keys, vec!["alpha2019", "beta2021", "gamma2021"]);
    assert!(list[0]["entry"].as_str().unwrap().starts_with("[1] "));
}

#[test]
fn test_cli_build_with_config_file() {
    let bib = create_temp_file(SAMPLE_BIB, ".bib");
    let config = create_temp_file(
        &format!(
            "src = {:?}\nstyle = \"minimal\"\nsort = \"name\"\n",
            bib.path().to_str().unwrap()
        ),
        ".toml",
    );

    let output = publist()
        .args(["build", "--config", config.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let context = stdout_json(&output);
    let keys: Vec<&str> = context["publications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["alpha2019", "beta2021", "gamma2021"]);
}

#[test]
fn test_cli_build_without_settings_is_noop() {
    let output = publist().arg("build").output().expect("Failed to execute command");

    assert!(output.status.success());
    let context = stdout_json(&output);
    assert!(context.get("publications").is_none());
}

#[test]
fn test_cli_build_invalid_sort_skips_publications() {
    let bib = create_temp_file(SAMPLE_BIB, ".bib");

    let output = publist()
        .args([
            "build",
            "--bib",
            bib.path().to_str().unwrap(),
            "--style",
            "minimal",
            "--sort",
            "bogus",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "an invalid sort must not fail the run");
    let context = stdout_json(&output);
    assert!(context.get("publications").is_none());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid sort option: bogus"), "stderr: {}", stderr);
}

#[test]
fn test_cli_build_show_bibtex_warnings() {
    let bib = create_temp_file(SAMPLE_BIB, ".bib");

    let output = publist()
        .args([
            "build",
            "--bib",
            bib.path().to_str().unwrap(),
            "--style",
            "minimal",
            "--show-bibtex-warnings",
        ])
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unsupported BibTeX field 'keywords'"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_cli_build_writes_output_file() {
    let bib = create_temp_file(SAMPLE_BIB, ".bib");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("context.json");

    let output = publist()
        .args([
            "build",
            "--bib",
            bib.path().to_str().unwrap(),
            "--style",
            "minimal",
            "-o",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["publications"].as_array().unwrap().len(), 3);
}

// ============================================
// Tests for exit codes
// ============================================

#[test]
fn test_cli_invalid_config_exit_code() {
    let config = create_temp_file("src = [unclosed", ".toml");

    let output = publist()
        .args(["build", "--config", config.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(11));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("hint:"), "stderr: {}", stderr);
}

#[test]
fn test_cli_unwritable_output_exit_code() {
    let bib = create_temp_file(SAMPLE_BIB, ".bib");

    let output = publist()
        .args([
            "build",
            "--bib",
            bib.path().to_str().unwrap(),
            "--style",
            "minimal",
            "-o",
            "/nonexistent/dir/out.json",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(15));
}
