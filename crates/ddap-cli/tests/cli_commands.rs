use std::path::Path;

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;

fn base_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ddap"));
    cmd.env("HOME", home);
    cmd
}

fn seed_session(home: &Path, server_url: &str) {
    let dir = home.join(".ddap");
    std::fs::create_dir_all(&dir).expect("session dir");
    let session = json!({
        "url": server_url,
        "realm": "master",
        "dams": {"dam1": {"id": "dam1", "url": server_url}},
        "credentials": {"kind": "anonymous"}
    });
    std::fs::write(dir.join("session.json"), session.to_string()).expect("session file");
}

#[test]
fn list_without_a_session_fails_with_login_hint() {
    let home = tempdir().expect("tempdir");
    base_cmd(home.path())
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("run `ddap login` first"));
}

#[test]
fn missing_subcommand_exits_one_and_help_exits_zero() {
    let home = tempdir().expect("tempdir");
    base_cmd(home.path()).assert().code(1);
    base_cmd(home.path()).arg("--help").assert().success();
}

#[test]
fn login_saves_the_session_file() {
    let home = tempdir().expect("tempdir");
    let mut server = Server::new();

    server
        .mock("POST", "/api/v1alpha/realm/master/cli/login")
        .with_status(201)
        .with_header("location", &format!("{}/status", server.url()))
        .with_body(json!({"token": "corr-1"}).to_string())
        .create();
    server
        .mock("GET", "/status")
        .match_header("authorization", "Bearer corr-1")
        .with_body(
            json!({
                "tokens": {"accessToken": "acc-1"},
                "webLoginUrl": "https://ddap.example.com/login/abc"
            })
            .to_string(),
        )
        .create();
    server
        .mock("GET", "/api/v1alpha/realm/master/dam")
        .with_body(json!({"dam1": {"id": "dam1", "url": "https://a"}}).to_string())
        .create();

    base_cmd(home.path())
        .args(["login", "--location", &server.url(), "--realm", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Login successful"));

    let saved = std::fs::read_to_string(home.path().join(".ddap/session.json"))
        .expect("session file written");
    let session: serde_json::Value = serde_json::from_str(&saved).expect("session json");
    assert_eq!(session["realm"], "master");
    assert_eq!(session["dams"]["dam1"]["id"], "dam1");
    assert_eq!(session["dams"]["dam1"]["url"], "https://a");
    assert_eq!(session["tokens"]["accessToken"], "acc-1");
}

#[test]
fn get_access_prints_the_grant() {
    let home = tempdir().expect("tempdir");
    let mut server = Server::new();
    seed_session(home.path(), &server.url());

    server
        .mock(
            "POST",
            Matcher::Regex(
                "^/api/v1alpha/realm/master/cli/[0-9a-f-]+/authorize/clear$".to_string(),
            ),
        )
        .with_body("{}")
        .create();
    server
        .mock(
            "GET",
            Matcher::Regex(
                "^/api/v1alpha/realm/master/cli/[0-9a-f-]+/authorize/status.*$".to_string(),
            ),
        )
        .with_body(
            json!({"interfaces": {"gcp:gs": {"accessToken": "tok-1", "uri": ["gs://bucket"]}}})
                .to_string(),
        )
        .create();

    base_cmd(home.path())
        .args(["get-access", "--interface-id", "gcp:gs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Access token acquired"))
        .stdout(predicate::str::contains("tok-1"));
}

#[test]
fn get_access_writes_an_env_file() {
    let home = tempdir().expect("tempdir");
    let mut server = Server::new();
    seed_session(home.path(), &server.url());

    server
        .mock(
            "POST",
            Matcher::Regex(
                "^/api/v1alpha/realm/master/cli/[0-9a-f-]+/authorize/clear$".to_string(),
            ),
        )
        .with_body("{}")
        .create();
    server
        .mock(
            "GET",
            Matcher::Regex(
                "^/api/v1alpha/realm/master/cli/[0-9a-f-]+/authorize/status.*$".to_string(),
            ),
        )
        .with_body(
            json!({
                "interfaces": {
                    "http:gcp:gs": {
                        "accessToken": "tok-2",
                        "uri": ["https://storage.example.com/bucket"]
                    }
                }
            })
            .to_string(),
        )
        .create();

    let env_path = home.path().join("access.env");
    base_cmd(home.path())
        .args([
            "get-access",
            "--interface-id",
            "http:gcp:gs",
            "--env-file",
            env_path.to_str().expect("utf8 path"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use `source`"));

    let contents = std::fs::read_to_string(&env_path).expect("env file");
    assert_eq!(
        contents,
        "TOKEN=tok-2\nHTTP_BUCKET_URL=https://storage.example.com/bucket\n"
    );
}

#[test]
fn get_access_requires_a_target() {
    let home = tempdir().expect("tempdir");
    base_cmd(home.path()).arg("get-access").assert().code(1);
}
