//! Integration tests for CLI functionality

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get path to compiled binary
fn cfctl_bin() -> &'static std::path::Path {
    assert_cmd::cargo::cargo_bin!("cfctl")
}

/// Command isolated from the caller's session, proxy and target settings
fn cfctl(session_file: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cfctl_bin());
    cmd.env_remove("CF_PROXY")
        .env_remove("CF_TARGET")
        .env("NO_PROXY", "127.0.0.1,localhost")
        .env("CFCTL_SESSION_FILE", session_file);
    cmd
}

fn write_session(file: &std::path::Path, target: &str) {
    let session = serde_json::json!({
        "target_endpoint": target,
        "skip_ssl_verification": false,
        "access_token": "stored-access",
        "refresh_token": "stored-refresh"
    });
    fs::write(file, serde_json::to_string_pretty(&session).unwrap()).unwrap();
}

/// Test that help flag works
#[test]
fn test_help_flag() {
    let output = Command::new(cfctl_bin()).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cloud Foundry"));
    assert!(stdout.contains("login"));
    assert!(stdout.contains("delete"));
}

/// Test that version flag works
#[test]
fn test_version_flag() {
    let output = Command::new(cfctl_bin()).arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cfctl"));
}

#[test]
fn test_invalid_domain() {
    let dir = TempDir::new().unwrap();
    cfctl(&dir.path().join("session.json"))
        .args(["get", "buildpack", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_malformed_filter() {
    let dir = TempDir::new().unwrap();
    cfctl(&dir.path().join("session.json"))
        .args(["list", "apps", "-f", "space_guid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("field=value"));
}

#[test]
fn test_batch_without_session_asks_for_login() {
    let dir = TempDir::new().unwrap();
    cfctl(&dir.path().join("session.json"))
        .args(["--batch", "list", "orgs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cfctl login"));
}

#[test]
fn test_batch_corrupt_session_is_removed() {
    let dir = TempDir::new().unwrap();
    let session_file = dir.path().join("session.json");
    fs::write(&session_file, "garbage").unwrap();

    cfctl(&session_file)
        .args(["--batch", "list", "orgs"])
        .assert()
        .failure();
    assert!(!session_file.exists());
}

#[test]
fn test_login_batch_requires_username() {
    let dir = TempDir::new().unwrap();
    cfctl(&dir.path().join("session.json"))
        .args(["--batch", "login", "--target", "https://api.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--username"));
}

#[test]
fn test_login_rejects_target_without_scheme() {
    let dir = TempDir::new().unwrap();
    cfctl(&dir.path().join("session.json"))
        .args([
            "--batch",
            "login",
            "--target",
            "api.example.com",
            "-u",
            "admin",
            "-p",
            "secret",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http://"));
}

#[test]
fn test_logout_without_session() {
    let dir = TempDir::new().unwrap();
    cfctl(&dir.path().join("session.json"))
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved session"));
}

#[test]
fn test_logout_removes_session() {
    let dir = TempDir::new().unwrap();
    let session_file = dir.path().join("session.json");
    write_session(&session_file, "https://api.example.com");

    cfctl(&session_file)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!session_file.exists());
}

#[tokio::test]
async fn test_list_refreshes_and_persists_tokens() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "authorization_endpoint": mock_server.uri(),
            "token_endpoint": mock_server.uri()
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/apps"))
        .and(header("Authorization", "Bearer stored-access"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "new-access",
            "refresh_token": "new-refresh"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/apps"))
        .and(header("Authorization", "Bearer new-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_results": 1,
            "next_url": null,
            "resources": [{
                "metadata": {"guid": "550e8400-e29b-41d4-a716-446655440000"},
                "entity": {"name": "my-app"}
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let session_file = dir.path().join("session.json");
    write_session(&session_file, &mock_server.uri());

    let session_path = session_file.clone();
    let output = tokio::task::spawn_blocking(move || {
        cfctl(&session_path)
            .args(["--batch", "list", "apps", "-o", "json"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();
    output
        .assert()
        .success()
        .stdout(predicate::str::contains("my-app"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&session_file).unwrap()).unwrap();
    assert_eq!(saved["access_token"], "new-access");
    assert_eq!(saved["refresh_token"], "new-refresh");
}
