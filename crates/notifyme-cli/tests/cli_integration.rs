//! CLI Integration Tests
//!
//! Runs the `notifyme` binary end-to-end, with a mock GraphQL endpoint
//! where a backend is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notifyme_core::config::{
    ENV_API_KEY, ENV_API_URL, ENV_DUPLICATE_POLICY, ENV_PUBLIC_API_KEY, ENV_PUBLIC_API_URL,
    ENV_REQUEST_TIMEOUT, ENV_RESET_DELAY, ENV_SECRET_ID, ENV_SECRET_REGION,
};

const API_KEY: &str = "da2-cli-test-key";

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a CLI command isolated from the caller's environment
fn cli_cmd() -> Command {
    let mut cmd = Command::cargo_bin("notifyme").expect("Failed to find notifyme binary");
    for var in [
        ENV_API_URL,
        ENV_API_KEY,
        ENV_PUBLIC_API_URL,
        ENV_PUBLIC_API_KEY,
        ENV_SECRET_ID,
        ENV_SECRET_REGION,
        ENV_REQUEST_TIMEOUT,
        ENV_RESET_DELAY,
        ENV_DUPLICATE_POLICY,
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

async fn mock_graphql(server: &MockServer, operation: &str, response: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("x-api-key", API_KEY))
        .and(body_string_contains(operation))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_defaults_to_unconfigured() {
    cli_cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("API source: unconfigured"))
        .stdout(predicate::str::contains("Reset delay: 5s"))
        .stdout(predicate::str::contains("Duplicate check policy: fail-open"));
}

#[test]
fn test_config_redacts_api_key() {
    cli_cmd()
        .args(["--api-url", "https://example.invalid/graphql", "--api-key", API_KEY])
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("API source: static"))
        .stdout(predicate::str::contains("https://example.invalid/graphql"))
        .stdout(predicate::str::contains("[REDACTED]"))
        .stdout(predicate::str::contains(API_KEY).not());
}

#[test]
fn test_config_reads_environment() {
    cli_cmd()
        .env(ENV_SECRET_ID, "notifyme/appsync")
        .env(ENV_DUPLICATE_POLICY, "fail-closed")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("API source: secret-store"))
        .stdout(predicate::str::contains("Secret: notifyme/appsync"))
        .stdout(predicate::str::contains("Region: us-east-1"))
        .stdout(predicate::str::contains("Duplicate check policy: fail-closed"));
}

#[test]
fn test_config_rejects_bad_timeout_env() {
    cli_cmd()
        .env(ENV_REQUEST_TIMEOUT, "soon")
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains(ENV_REQUEST_TIMEOUT));
}

#[test]
fn test_config_rejects_zero_timeout() {
    cli_cmd()
        .env(ENV_REQUEST_TIMEOUT, "0")
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be at least 1 second"));

    cli_cmd()
        .args(["--timeout", "0", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout"));
}

// ============================================================================
// Signup Command Tests
// ============================================================================

#[test]
fn test_signup_rejects_invalid_email() {
    cli_cmd()
        .args(["signup", "--name", "Ada", "--surname", "Lovelace", "--email", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid email address"));
}

#[test]
fn test_signup_without_configuration() {
    cli_cmd()
        .args(["signup", "--name", "Ada", "--surname", "Lovelace", "--email", "ada@example.com"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("API configuration is missing."));
}

#[test]
fn test_check_without_configuration() {
    cli_cmd()
        .args(["check", "ada@example.com"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("API configuration is missing."));
}

#[test]
fn test_signup_requires_all_fields() {
    cli_cmd()
        .args(["signup", "--name", "Ada", "--email", "ada@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--surname"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_signup_creates_record() {
    let server = MockServer::start().await;
    mock_graphql(&server, "getNotifymedb", json!({ "data": { "getNotifymedb": null } })).await;
    mock_graphql(
        &server,
        "createNotifymedb",
        json!({
            "data": {
                "createNotifymedb": {
                    "CustomerID": "ada@example.com",
                    "Name": "Ada",
                    "Surname": "Lovelace",
                    "Email": "ada@example.com"
                }
            }
        }),
    )
    .await;

    let api_url = format!("{}/graphql", server.uri());
    tokio::task::spawn_blocking(move || {
        cli_cmd()
            .args(["--api-url", &api_url, "--api-key", API_KEY])
            .args(["signup", "--name", "Ada", "--surname", "Lovelace", "--email", "ada@example.com"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Thank you, we will notify you prior to the launch!",
            ))
            .stdout(predicate::str::contains("CustomerID: ada@example.com"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_signup_duplicate_succeeds_without_create() {
    let server = MockServer::start().await;
    mock_graphql(
        &server,
        "getNotifymedb",
        json!({ "data": { "getNotifymedb": { "CustomerID": "dup@example.com" } } }),
    )
    .await;
    Mock::given(method("POST"))
        .and(body_string_contains("createNotifymedb"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let api_url = format!("{}/graphql", server.uri());
    tokio::task::spawn_blocking(move || {
        cli_cmd()
            .args(["--api-url", &api_url, "--api-key", API_KEY])
            .args(["signup", "--name", "Ada", "--surname", "Lovelace", "--email", "dup@example.com"])
            .assert()
            .success()
            .stdout(predicate::str::contains("This email is already being used."));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_reports_registration() {
    let server = MockServer::start().await;
    mock_graphql(
        &server,
        "getNotifymedb",
        json!({ "data": { "getNotifymedb": { "CustomerID": "ada@example.com" } } }),
    )
    .await;

    let api_url = format!("{}/graphql", server.uri());
    tokio::task::spawn_blocking(move || {
        cli_cmd()
            .args(["--api-url", &api_url, "--api-key", API_KEY])
            .args(["check", "ada@example.com"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ada@example.com is registered"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_signup_writes_jsonl_logs() {
    let server = MockServer::start().await;
    mock_graphql(&server, "getNotifymedb", json!({ "data": { "getNotifymedb": null } })).await;
    mock_graphql(&server, "createNotifymedb", json!({ "data": { "createNotifymedb": null } }))
        .await;

    let logs = TempDir::new().unwrap();
    let logs_path = logs.path().to_path_buf();
    let api_url = format!("{}/graphql", server.uri());
    tokio::task::spawn_blocking(move || {
        cli_cmd()
            .args(["--api-url", &api_url, "--api-key", API_KEY, "-v"])
            .arg("--logs-dir")
            .arg(&logs_path)
            .args(["signup", "--name", "Ada", "--surname", "Lovelace", "--email", "ada@example.com"])
            .assert()
            .success();
    })
    .await
    .unwrap();

    let raw = logs.path().join("raw");
    let contents: String = std::fs::read_dir(&raw)
        .unwrap()
        .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap())
        .collect();
    assert!(contents.contains("Signup record created"));
    assert!(!contents.contains(API_KEY));
}
