//! CLI behavior tests: exit codes, output formats, init.
//!
//! All runs use --input with the saved fixtures so no test touches the network.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const KEYWORDS: &str = "test-data/keywords.txt";
const SERP_DIR: &str = "test-data/serp";

fn serpvis_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_serpvis"))
}

fn offline_args(cmd: &mut Command) {
    cmd.arg(KEYWORDS)
        .arg("--brand")
        .arg("acme")
        .arg("--input")
        .arg(SERP_DIR)
        .arg("--delay-ms")
        .arg("0");
}

#[test]
fn no_args_returns_error_not_panic() {
    let mut cmd = serpvis_cmd();
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("keyword"));
}

#[test]
fn missing_brand_exit_2() {
    let mut cmd = serpvis_cmd();
    cmd.arg(KEYWORDS).arg("--input").arg(SERP_DIR);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("brand"));
}

#[test]
fn missing_keywords_file_exit_2() {
    let mut cmd = serpvis_cmd();
    cmd.arg("nonexistent.txt").arg("--brand").arg("acme");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nonexistent"));
}

#[test]
fn no_api_key_without_input_exit_2() {
    let mut cmd = serpvis_cmd();
    cmd.arg(KEYWORDS)
        .arg("--brand")
        .arg("acme")
        .env_remove("SERPAPI_KEY");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn offline_run_succeeds() {
    let mut cmd = serpvis_cmd();
    offline_args(&mut cmd);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("wireless headphones"));
}

#[test]
fn json_output_valid() {
    let mut cmd = serpvis_cmd();
    offline_args(&mut cmd);
    cmd.arg("--json");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert_eq!(parsed["summary"]["keywords"], 3);
    assert_eq!(parsed["results"][0]["score"]["grade"], "A");
}

#[test]
fn quiet_output_one_line_per_keyword() {
    let mut cmd = serpvis_cmd();
    offline_args(&mut cmd);
    cmd.arg("--quiet").arg("--no-color");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = s.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "wireless headphones: 2.50 (A)");
    assert_eq!(lines[1], "coffee maker: 0.00 (F)");
    assert_eq!(lines[2], "running shoes: 1.00 (D)");
}

#[test]
fn below_threshold_exit_1() {
    let mut cmd = serpvis_cmd();
    offline_args(&mut cmd);
    cmd.arg("--threshold").arg("5");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("below threshold"));
}

#[test]
fn above_threshold_exit_0() {
    let mut cmd = serpvis_cmd();
    offline_args(&mut cmd);
    cmd.arg("--threshold").arg("0.5");
    cmd.assert().success();
}

#[test]
fn csv_flag_writes_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let csv_path = dir.path().join("out.csv");
    let mut cmd = serpvis_cmd();
    offline_args(&mut cmd);
    cmd.arg("--csv").arg(&csv_path);
    cmd.assert().success();

    let content = fs::read_to_string(&csv_path).unwrap();
    assert!(content.starts_with("Keyword,Organic results,"));
    assert_eq!(content.lines().count(), 4, "header plus three keywords");
}

#[test]
fn missing_fixture_tolerated_with_warning() {
    let mut cmd = serpvis_cmd();
    cmd.arg("--keyword")
        .arg("no saved payload")
        .arg("--brand")
        .arg("acme")
        .arg("--input")
        .arg(SERP_DIR)
        .arg("--delay-ms")
        .arg("0")
        .arg("--json");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(s.trim()).unwrap();
    assert_eq!(parsed["summary"]["fetchFailures"], 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fetch failed"));
}

#[test]
fn repeatable_keyword_flag() {
    let mut cmd = serpvis_cmd();
    cmd.arg("--keyword")
        .arg("running shoes")
        .arg("--keyword")
        .arg("coffee maker")
        .arg("--brand")
        .arg("acme")
        .arg("--input")
        .arg(SERP_DIR)
        .arg("--delay-ms")
        .arg("0")
        .arg("--quiet")
        .arg("--no-color");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    assert_eq!(s.lines().count(), 2);
    assert!(s.starts_with("running shoes:"));
}

#[test]
fn init_creates_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".serpvisrc.json");
    let mut cmd = serpvis_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert().success();
    assert!(config_path.exists(), ".serpvisrc.json should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("threshold"));
    assert!(content.contains("delayMs"));
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join(".serpvisrc.json"), "{}").unwrap();
    let mut cmd = serpvis_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn invalid_config_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("bad.json");
    fs::write(
        &config_path,
        r#"{ "features": [
            { "label": "Ads", "sourceKey": "ads", "category": "non-traditional" },
            { "label": "Ads", "sourceKey": "shopping_results", "category": "non-traditional" }
        ] }"#,
    )
    .unwrap();
    let mut cmd = serpvis_cmd();
    offline_args(&mut cmd);
    cmd.arg("--config").arg(&config_path);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("duplicate feature label"));
}
