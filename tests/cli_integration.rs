//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get the binary for testing, isolated from the caller's environment
fn gitsage_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gitsage-dashboard").unwrap();
    cmd.env_remove("GITSAGE_BASE_URL")
        .env_remove("GITSAGE_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Run a command off the async runtime so the mock server keeps serving.
async fn run(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap()
}

#[test]
fn test_version_output() {
    gitsage_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gitsage-dashboard"));
}

#[test]
fn test_help_shows_all_commands() {
    gitsage_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("call"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("notify"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_config_init_writes_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("gitsage.toml");

    gitsage_cmd()
        .args(["config", "init", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("interval_ms = 30000"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("gitsage.toml");
    std::fs::write(&output, "keep me").unwrap();

    gitsage_cmd()
        .args(["config", "init", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_completions_bash() {
    gitsage_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gitsage-dashboard"));
}

#[test]
fn test_notify_prints_message() {
    let temp_dir = TempDir::new().unwrap();

    gitsage_cmd()
        .current_dir(temp_dir.path())
        .args(["notify", "Backup failed", "-s", "error", "--no-wait"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ERROR] Backup failed"));
}

#[test]
fn test_watch_off_root_does_nothing() {
    let temp_dir = TempDir::new().unwrap();

    gitsage_cmd()
        .current_dir(temp_dir.path())
        .args(["watch", "--path", "/settings", "-u", "http://127.0.0.1:9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));
}

#[test]
fn test_invalid_base_url_rejected() {
    let temp_dir = TempDir::new().unwrap();

    gitsage_cmd()
        .current_dir(temp_dir.path())
        .args(["call", "/api/config", "-u", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("client.base_url"));
}

#[tokio::test]
async fn test_call_prints_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/config"))
        .and(header("x-foo", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {"a": 1}})),
        )
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = gitsage_cmd();
    cmd.current_dir(temp_dir.path()).args([
        "call",
        "/api/config",
        "--compact",
        "-H",
        "X-Foo: 1",
        "-u",
        uri.as_str(),
    ]);

    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains(r#"{"data":{"a":1},"success":true}"#));
}

#[tokio::test]
async fn test_call_http_error_exits_nonzero() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = gitsage_cmd();
    cmd.current_dir(temp_dir.path())
        .args(["call", "/api/missing", "-u", uri.as_str()]);

    run(cmd)
        .await
        .failure()
        .stderr(predicate::str::contains("HTTP error! status: 404"));
}

#[tokio::test]
async fn test_watch_once_prints_recommendations() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/environment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {},
            "recommendations": [
                {"priority": "MEDIUM", "message": "Install PyYAML", "action": "pip install pyyaml"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = gitsage_cmd();
    cmd.current_dir(temp_dir.path())
        .args(["watch", "--once", "-u", uri.as_str()]);

    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("Environment: OK"))
        .stdout(predicate::str::contains("[MEDIUM] Install PyYAML"));
}
