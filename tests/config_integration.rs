//! Integration tests for the ferry-config crate.

use std::fs;

use ferry_config::auth::resolve_token_with;
use ferry_config::persistence::find_config_file_in;
use ferry_config::{Config, ConfigError};
use tempfile::TempDir;

#[test]
fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("ferry.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Configuration for ferry
            jira_url: "https://company.atlassian.net",
            project: "PROJ",
            username: "me@company.com",
            api_token: "file-token",
            state: "closed",
            prefix: "proj",
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.jira_url.as_deref(), Some("https://company.atlassian.net"));
    assert_eq!(config.project.as_deref(), Some("PROJ"));
    assert_eq!(config.username.as_deref(), Some("me@company.com"));
    assert_eq!(config.state(), "closed");
    assert_eq!(config.prefix.as_deref(), Some("proj"));
}

#[test]
fn config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("config.json");

    let original = Config {
        jira_url: Some("https://jira.example.com".to_string()),
        jql: Some("project = OPS AND labels = infra".to_string()),
        state: Some("all".to_string()),
        ..Default::default()
    };

    original.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();
    assert_eq!(original, loaded);

    let content = fs::read_to_string(&config_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(json.get("api_token").is_none());
}

#[test]
fn config_file_then_env_then_token() {
    let local = TempDir::new().unwrap();
    fs::write(
        local.path().join("ferry.json"),
        r#"{"jira_url": "https://jira.example.com", "project": "OLD"}"#,
    )
    .unwrap();

    let path = find_config_file_in(local.path(), None).unwrap();
    let mut config = Config::load_from(path).unwrap();

    let env = |name: &str| match name {
        "FERRY_JIRA_PROJECT" => Some("NEW".to_string()),
        "JIRA_API_TOKEN" => Some("env-token".to_string()),
        _ => None,
    };
    config.apply_env_with(env);
    config.validate().unwrap();

    assert_eq!(config.project.as_deref(), Some("NEW"));
    assert_eq!(
        resolve_token_with(config.api_token.as_deref(), env).as_deref(),
        Some("env-token")
    );
}

#[test]
fn config_invalid_url_in_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("ferry.json5");
    fs::write(&config_path, r#"{ jira_url: "ftp://jira.example.com" }"#).unwrap();

    let err = Config::load_from(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    assert!(err.to_string().contains("http:// or https://"));
}
