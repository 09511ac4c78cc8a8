// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the `director` binary against temporary configuration files.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const CONFIG: &str = r#"
[routing]
confidence_threshold = 0.6
default_department = "general"

[llm]
enabled = false

[[departments]]
name = "communications"
keywords = ["email", "send", "message"]

[[departments]]
name = "analysis"
keywords = ["data", "report", "metrics"]
"#;

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("director.toml");
    std::fs::write(&path, content).unwrap();
    path
}

fn director(config: &Path, args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_director"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
    }
    child.wait_with_output().unwrap()
}

#[test]
fn route_prints_single_agent_decision() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let output = director(
        &config,
        &["route", "--description", "send the email message", "--complexity", "2"],
        None,
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["strategy"], "SINGLE_AGENT");
    assert_eq!(json["routed_to"], "communications");
    assert_eq!(json["target_agents"], serde_json::json!(["communications"]));
    assert_eq!(json["method"], "KEYWORD");
    assert_eq!(json["fallback_used"], false);
}

#[test]
fn route_rejects_empty_description() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let output = director(&config, &["route", "--description", "  "], None);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("description is empty"));
}

#[test]
fn batch_emits_one_line_per_task() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);
    let input = concat!(
        "{\"description\": \"send the email message\"}\n",
        "{\"description\": \"xyz abc\"}\n",
        "oops\n",
    );

    let output = director(&config, &["batch", "--concurrency", "2"], Some(input));
    assert!(output.status.success());

    let mut lines: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    lines.sort_by_key(|l| l["line"].as_u64());

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["decision"]["department"], "communications");
    assert_eq!(lines[1]["decision"]["department"], "general");
    assert!(lines[2]["error"].as_str().unwrap().contains("invalid task JSON"));
}

#[test]
fn check_config_prints_profile() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let output = director(&config, &["check-config"], None);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("confidence threshold:  0.60"));
    assert!(stdout.contains("data, report, metrics"));
}

#[test]
fn invalid_config_exits_with_code_two() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[routing]\nconfidence_treshold = 0.5\n");

    let output = director(&config, &["check-config"], None);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn check_config_uses_profile_file() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("profile.toml");
    std::fs::write(
        &profile,
        "[[departments]]\nname = \"billing\"\nkeywords = [\"invoice\", \"refund\"]\n",
    )
    .unwrap();
    let config = write_config(
        dir.path(),
        &format!("[routing]\nprofile_path = {:?}\n", profile.display().to_string()),
    );

    let output = director(&config, &["check-config"], None);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("billing"));
    assert!(!stdout.contains("communications"));
}
