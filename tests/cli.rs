//! End-to-end tests for the `tua` binary.
//!
//! Remote calls go to a wiremock server via `TUA_API_BASE`.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMELINE_PATH: &str = "/1.1/statuses/user_timeline.json";

const CREDENTIAL_VARS: &[&str] = &[
    "TWITTER_CONSUMER_KEY",
    "TWITTER_CONSUMER_SECRET",
    "TWITTER_ACCESS_TOKEN",
    "TWITTER_ACCESS_TOKEN_SECRET",
    "TWITTER_BEARER_TOKEN",
    "TUA_API_BASE",
    "TUA_CONFIG",
];

/// A `tua` command with a clean environment and an empty config file.
fn tua(dir: &TempDir) -> Command {
    let config = dir.path().join("tua.json");
    fs::write(&config, "{}").unwrap();

    let mut cmd = Command::cargo_bin("tua").unwrap();
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("-c").arg(config);
    cmd
}

fn timeline_server(mocks: Vec<Mock>) -> (tokio::runtime::Runtime, MockServer) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        for mock in mocks {
            mock.mount(&server).await;
        }
        server
    });
    (runtime, server)
}

fn ids(content: &str) -> Vec<u64> {
    content
        .lines()
        .map(|l| serde_json::from_str::<Value>(l).unwrap()["id"].as_u64().unwrap())
        .collect()
}

#[test]
fn test_user_argument_required() {
    let dir = TempDir::new().unwrap();
    tua(&dir).assert().failure().code(2);
}

#[test]
fn test_invalid_page_size() {
    let dir = TempDir::new().unwrap();
    let output = tua(&dir)
        .args(["--count", "0", "someone"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stderr).contains("page size"));
}

#[test]
fn test_missing_credentials_json_error() {
    let dir = TempDir::new().unwrap();
    let output = tua(&dir).args(["--json", "someone"]).output().unwrap();

    assert_eq!(output.status.code(), Some(7));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "CONFIG_ERROR");
    assert!(err["error"]["hint"].is_string());
}

#[test]
fn test_explicit_config_must_exist() {
    let mut cmd = Command::cargo_bin("tua").unwrap();
    cmd.args(["-c", "/nonexistent/tua.json", "someone"])
        .assert()
        .failure()
        .code(7);
}

#[test]
fn test_full_archive_to_stdout() {
    let (_runtime, server) = timeline_server(vec![
        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .and(query_param("screen_name", "someone"))
            .and(query_param_is_missing("max_id"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 3}, {"id": 2}])),
            ),
        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .and(query_param("max_id", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}]))),
        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .and(query_param("max_id", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    ]);

    let dir = TempDir::new().unwrap();
    let output = tua(&dir)
        .env("TUA_API_BASE", server.uri())
        .env("TWITTER_BEARER_TOKEN", "token")
        .args(["-q", "someone"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(ids(&String::from_utf8(output.stdout).unwrap()), vec![3, 2, 1]);
}

#[test]
fn test_update_existing_archive() {
    let (_runtime, server) = timeline_server(vec![
        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .and(query_param("since_id", "10"))
            .and(query_param_is_missing("max_id"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 12}, {"id": 11}])),
            ),
        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .and(query_param("since_id", "10"))
            .and(query_param("max_id", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    ]);

    let dir = TempDir::new().unwrap();
    let archive: PathBuf = dir.path().join("someone.jsonl");
    let existing = "{\"id\":10}\n{\"id\":9}\n";
    fs::write(&archive, existing).unwrap();

    let output = tua(&dir)
        .env("TUA_API_BASE", server.uri())
        .env("TWITTER_BEARER_TOKEN", "token")
        .arg("--json")
        .arg("-a")
        .arg(&archive)
        .arg("someone")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let content = fs::read_to_string(&archive).unwrap();
    assert_eq!(ids(&content), vec![12, 11, 10, 9]);
    assert!(content.ends_with(existing));

    let summary: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(summary["stats"]["records"], 2);
    assert_eq!(summary["total_records"], 4);
}

#[test]
fn test_update_fetch_failure_keeps_archive() {
    let (_runtime, server) = timeline_server(vec![
        Mock::given(method("GET"))
            .and(path(TIMELINE_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded")),
    ]);

    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("someone.jsonl");
    let existing = "{\"id\":10}\n";
    fs::write(&archive, existing).unwrap();

    tua(&dir)
        .env("TUA_API_BASE", server.uri())
        .env("TWITTER_BEARER_TOKEN", "token")
        .arg("-a")
        .arg(&archive)
        .arg("someone")
        .assert()
        .failure()
        .code(6);

    assert_eq!(fs::read_to_string(&archive).unwrap(), existing);
    // Only the archive and the config file remain.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}
