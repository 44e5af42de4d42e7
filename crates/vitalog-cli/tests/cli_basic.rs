//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "vitalog-cli", "--"])
        .args(args)
        .env("VITALOG_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_supplement_list() {
    let (stdout, _, code) = run_cli(&["supplement", "list"]);
    assert_eq!(code, 0, "Supplement list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Supplement list is not JSON");
    assert!(!parsed.as_array().expect("expected array").is_empty());
}

#[test]
fn test_supplement_show_unknown() {
    let (stdout, _, code) = run_cli(&["supplement", "show", "no-such-id"]);
    assert_eq!(code, 0, "Supplement show failed");
    assert!(stdout.contains("not found"));
}

#[test]
fn test_supplement_take_and_today() {
    let (stdout, _, code) = run_cli(&[
        "supplement",
        "take",
        "vitamin_c",
        "--date",
        "2024-01-15",
    ]);
    assert_eq!(code, 0, "Supplement take failed");
    assert!(stdout.contains("Vitamin C"));

    let (stdout, _, code) = run_cli(&["supplement", "today", "--date", "2024-01-15"]);
    assert_eq!(code, 0, "Supplement today failed");
    assert!(stdout.contains("vitamin_c"));
}

#[test]
fn test_quiz_questions() {
    let (stdout, _, code) = run_cli(&["quiz", "questions"]);
    assert_eq!(code, 0, "Quiz questions failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Quiz questions is not JSON");
    assert!(!parsed.as_array().expect("expected array").is_empty());
}

#[test]
fn test_quiz_history() {
    let (_, _, code) = run_cli(&["quiz", "history"]);
    assert_eq!(code, 0, "Quiz history failed");
}

#[test]
fn test_rewards_summary() {
    let (stdout, _, code) = run_cli(&["rewards", "summary"]);
    assert_eq!(code, 0, "Rewards summary failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Rewards summary is not JSON");
    assert!(parsed.get("total_coins_earned").is_some());
}

#[test]
fn test_rewards_transactions() {
    let (_, _, code) = run_cli(&["rewards", "transactions", "--limit", "5"]);
    assert_eq!(code, 0, "Rewards transactions failed");
}

#[test]
fn test_rewards_spend_overdraft_fails() {
    let (_, stderr, code) = run_cli(&["rewards", "spend", "1000000"]);
    assert_ne!(code, 0, "Overdraft spend should fail");
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "notifications.morning"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(stdout.contains(':'));
}

#[test]
fn test_config_set_and_list() {
    let (_, _, code) = run_cli(&["config", "set", "language", "English"]);
    assert_eq!(code, 0, "Config set failed");

    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    assert!(stdout.contains("notifications"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, _, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0, "Unknown config key should fail");
}

#[test]
fn test_auth_status() {
    let (_, _, code) = run_cli(&["auth", "status"]);
    assert_eq!(code, 0, "Auth status failed");
}

#[test]
fn test_profile_show() {
    let (_, _, code) = run_cli(&["profile", "show"]);
    assert_eq!(code, 0, "Profile show failed");
}
