//! End-to-end tests running the `itr` binary against scripted operations.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

fn itr_binary() -> String {
    env!("CARGO_BIN_EXE_itr").to_string()
}

/// Builds a command isolated from the user's config and environment.
fn itr(home: &Path) -> Command {
    let mut command = Command::new(itr_binary());
    command
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("ITR_ENABLED")
        .env_remove("ITR_NAME");
    command
}

fn json_lines(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line should be JSON"))
        .collect()
}

const SCRIPT: &str = r#"{"op":"start","action":"checkout","options":{"cart":3},"at":5000}
{"op":"end","action":"checkout","options":{"paid":true},"at":6250}
{"op":"end","action":"orphan","options":42,"at":7000}
"#;

#[test]
fn replay_from_file_prints_events() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("script.jsonl");
    std::fs::write(&script, SCRIPT).unwrap();

    let output = itr(temp.path())
        .arg("--enabled")
        .arg("replay")
        .arg(&script)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "replay should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let lines = json_lines(&output);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["kind"], "startAction");
    assert_eq!(lines[1]["kind"], "duration");
    assert_eq!(lines[1]["payload"]["duration"], 1250);
    assert_eq!(lines[1]["payload"]["endOptions"]["paid"], true);
    assert_eq!(lines[2]["action"], "orphan");
    assert_eq!(lines[2]["kind"], "endAction");
    assert_eq!(lines[2]["payload"]["data"], 42);
}

#[test]
fn replay_reads_stdin() {
    let temp = TempDir::new().unwrap();

    let mut child = itr(temp.path())
        .arg("--enabled")
        .arg("replay")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(SCRIPT.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(json_lines(&output).len(), 3);
}

#[test]
fn tracker_is_disabled_without_configuration() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("script.jsonl");
    std::fs::write(&script, SCRIPT).unwrap();

    let output = itr(temp.path())
        .arg("replay")
        .arg(&script)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "disabled tracker emits nothing");
}

#[test]
fn config_file_and_environment_enable_tracker() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("script.jsonl");
    std::fs::write(&script, SCRIPT).unwrap();
    let config = temp.path().join("itr.toml");
    std::fs::write(&config, "enabled = true\nname = \"$checkout\"\n").unwrap();

    let output = itr(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg(&script)
        .output()
        .unwrap();
    assert_eq!(json_lines(&output).len(), 3);

    let output = itr(temp.path())
        .env("ITR_ENABLED", "true")
        .arg("replay")
        .arg(&script)
        .output()
        .unwrap();
    assert_eq!(json_lines(&output).len(), 3);

    let output = itr(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("config")
        .output()
        .unwrap();
    let shown: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["enabled"], true);
    assert_eq!(shown["name"], "$checkout");
}

#[test]
fn malformed_script_fails_with_line_number() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("broken.jsonl");
    std::fs::write(&script, "{\"op\":\"start\",\"action\":\"a\"}\n{\"op\":\n").unwrap();

    let output = itr(temp.path())
        .arg("--enabled")
        .arg("replay")
        .arg(&script)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid operation on line 2"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn missing_script_reports_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.jsonl");

    let output = itr(temp.path())
        .arg("replay")
        .arg(&missing)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to open"), "unexpected stderr: {stderr}");
}
