use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const ENV_VARS: [&str; 7] = [
    "CRICSPHERE_API_URL",
    "CRICSPHERE_CONFIG",
    "CRICSPHERE_DATA_DIR",
    "CRICSPHERE_FORMAT",
    "CRICSPHERE_NO_CACHE",
    "CRICSPHERE_DEBUG",
    "CRICSPHERE_PASSWORD",
];

/// Binary pointed at a throwaway config and data directory
fn cricsphere(temp: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cricsphere"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--config")
        .arg(temp.join("config.yaml"))
        .arg("--data-dir")
        .arg(temp.join("data"));
    cmd
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    cricsphere(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "cricsphere version {}",
            env!("CARGO_PKG_VERSION")
        )));
    Ok(())
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("config.yaml");
    fs::write(&config_path, "api_url: http://127.0.0.1:9999\n")?;

    let assert = cricsphere(temp.path()).arg("status").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    assert!(stdout.contains("http://127.0.0.1:9999"));
    assert!(stdout.contains("Not signed in"));
    Ok(())
}

#[test]
fn status_json_reports_signed_out() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let assert = cricsphere(temp.path())
        .args(["status", "--format", "json"])
        .assert()
        .success();

    let body: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(body["data"]["signed_in"], false);
    assert_eq!(body["data"]["api_url"], "http://localhost:8080");
    assert_eq!(body["data"]["cache_entries"], 0);
    Ok(())
}

#[test]
fn config_set_url_persists_and_validates() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    cricsphere(temp.path())
        .args(["config", "set-url", "https://scores.example.com/"])
        .assert()
        .success();

    let saved = fs::read_to_string(temp.path().join("config.yaml"))?;
    assert!(saved.contains("https://scores.example.com"));

    cricsphere(temp.path())
        .args(["config", "set-url", "ftp://nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn cache_commands_work_offline() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    cricsphere(temp.path())
        .args(["cache", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("data"));

    cricsphere(temp.path())
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache was already empty"));
    Ok(())
}

#[test]
fn logout_without_session() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    cricsphere(temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));
    Ok(())
}

#[test]
fn completion_generates_script() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    cricsphere(temp.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cricsphere"));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn live_is_served_from_cache_on_second_run() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let live = server
        .mock("GET", "/api/v1/cricket/live")
        .match_header("authorization", mockito::Matcher::Missing)
        .with_status(200)
        .with_body(
            r#"{"data": [{"id": "m1", "name": "India vs Australia", "status": "India need 12 runs",
                 "teams": ["India", "Australia"],
                 "score": [{"inning": "Australia Inning 1", "r": 180, "w": 6, "o": 20}]}]}"#,
        )
        .expect(1)
        .create();

    let temp = tempdir()?;
    for _ in 0..2 {
        cricsphere(temp.path())
            .args(["live", "--format", "table", "--api-url", &server.url()])
            .assert()
            .success()
            .stdout(predicate::str::contains("India vs Australia"));
    }

    live.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn login_then_profile_sends_bearer_token() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/api/v1/auth/login")
        .with_status(200)
        .with_body(r#"{"token": "tok-123", "user": {"username": "rohit", "email": "r@example.com"}}"#)
        .create();
    let profile = server
        .mock("GET", "/api/v1/user/profile")
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_body(r#"{"username": "rohit", "email": "r@example.com", "role": "USER", "favoriteTeam": "India"}"#)
        .create();

    let temp = tempdir()?;
    let url = server.url();

    cricsphere(temp.path())
        .args(["login", "rohit", "--password", "secret", "--api-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as"));

    cricsphere(temp.path())
        .args(["profile", "get", "--api-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("India"));

    profile.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn unauthorized_response_clears_session() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/api/v1/auth/login")
        .with_status(200)
        .with_body(r#"{"token": "stale", "user": {"username": "rohit"}}"#)
        .create();
    let _profile = server
        .mock("GET", "/api/v1/user/profile")
        .with_status(401)
        .create();

    let temp = tempdir()?;
    let url = server.url();

    cricsphere(temp.path())
        .args(["login", "rohit", "--password", "secret", "--api-url", &url])
        .assert()
        .success();

    cricsphere(temp.path())
        .args(["profile", "get", "--api-url", &url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cricsphere login"));

    cricsphere(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn team_profile_survives_a_failed_section() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _players = server
        .mock("GET", "/api/v1/cricket/team/2/players")
        .with_status(200)
        .with_body(r#"{"player": [{"id": "1", "name": "Virat Kohli", "role": "Batsman"}]}"#)
        .create();
    let _stats = server
        .mock("GET", "/api/v1/cricket/team/2/stats")
        .with_status(500)
        .create();
    let _schedule = server
        .mock("GET", "/api/v1/cricket/team/2/schedule")
        .with_status(200)
        .with_body(r#"{"matches": [{"matchId": 5, "matchDesc": "1st ODI", "seriesName": "Asia Cup"}]}"#)
        .create();
    let _results = server
        .mock("GET", "/api/v1/cricket/team/2/results")
        .with_status(200)
        .with_body("[]")
        .create();

    let temp = tempdir()?;
    let assert = cricsphere(temp.path())
        .args(["teams", "get", "2", "--format", "json", "--api-url", &server.url()])
        .assert()
        .success();

    let body: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(body["data"]["team"]["name"], "Team 2");
    assert_eq!(body["data"]["team"]["coach"], "N/A");
    assert_eq!(body["data"]["squad"][0]["name"], "Virat Kohli");
    assert_eq!(body["data"]["schedule"][0]["series"], "Asia Cup");
    assert_eq!(body["data"]["unavailable"].as_array().map(Vec::len), Some(1));
    Ok(())
}
