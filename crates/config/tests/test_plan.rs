//! Test plan for the `agora-config` crate.
//!
//! These tests exercise the configuration loader across default handling,
//! file discovery, environment overrides, and validation behaviour.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use agora_config::{load, AppConfig, AuthConfig, HttpConfig, RealtimeConfig, MAX_CHANNEL_CAPACITY};

const ENV_VARS_TO_RESET: &[&str] = &[
    "AGORA_CONFIG",
    "AGORA__AUTH__COOKIE_NAME",
    "AGORA__AUTH__COOKIE_SECURE",
    "AGORA__AUTH__ISSUER",
    "AGORA__AUTH__JWT_SECRET",
    "AGORA__AUTH__TOKEN_TTL_SECONDS",
    "AGORA__DATABASE__MAX_CONNECTIONS",
    "AGORA__DATABASE__URL",
    "AGORA__HTTP__ADDRESS",
    "AGORA__HTTP__PORT",
    "AGORA__REALTIME__CHANNEL_CAPACITY",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            vars: Vec::new(),
            original_dir: None,
        }
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }
    }
}

fn write_config_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create config directories");
    }
    fs::write(path, contents).expect("failed to write config file");
}

#[test]
#[serial]
fn load_uses_default_values_when_no_files_found() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    let config = load().expect("configuration load should succeed without files");
    let defaults = AppConfig::default();

    assert_eq!(config.http.address, defaults.http.address);
    assert_eq!(config.http.port, defaults.http.port);
    assert_eq!(config.database.url, defaults.database.url);
    assert_eq!(
        config.database.max_connections,
        defaults.database.max_connections
    );
    assert_eq!(config.auth.jwt_secret, defaults.auth.jwt_secret);
    assert_eq!(config.auth.token_ttl_seconds, defaults.auth.token_ttl_seconds);
    assert_eq!(config.auth.cookie_name, defaults.auth.cookie_name);
    assert_eq!(
        config.realtime.channel_capacity,
        defaults.realtime.channel_capacity
    );
}

#[test]
#[serial]
fn load_picks_first_available_file_in_search_order() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "agora.toml",
        r#"
        [http]
        port = 4242
        "#,
    );
    write_config_file(
        temp_dir.path(),
        "config/agora.toml",
        r#"
        [http]
        port = 5151
        "#,
    );

    let config = load().expect("configuration load should pick the first file");
    assert_eq!(config.http.port, 4242);
}

#[test]
#[serial]
fn load_merges_partial_file_with_defaults() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "agora.toml",
        r#"
        [http]
        port = 8181

        [auth]
        cookie_name = "agora_session"
        "#,
    );

    let config = load().expect("configuration load should succeed");
    let defaults = AppConfig::default();

    assert_eq!(config.http.port, 8181);
    assert_eq!(config.http.address, defaults.http.address);
    assert_eq!(config.auth.cookie_name, "agora_session");
    assert_eq!(config.auth.issuer, defaults.auth.issuer);
    assert_eq!(config.database.url, defaults.database.url);
}

#[test]
#[serial]
fn load_reads_explicit_config_path() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "elsewhere/custom.toml",
        r#"
        [database]
        url = "sqlite://custom.db"
        max_connections = 3
        "#,
    );
    let path = temp_dir.path().join("elsewhere/custom.toml");
    ctx.set_var("AGORA_CONFIG", path.display().to_string());

    let config = load().expect("configuration load should honour AGORA_CONFIG");
    assert_eq!(config.database.url, "sqlite://custom.db");
    assert_eq!(config.database.max_connections, 3);
}

#[test]
#[serial]
fn load_applies_environment_overrides() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "agora.toml",
        r#"
        [http]
        port = 3030
        "#,
    );

    ctx.set_var("AGORA__HTTP__PORT", "8080");
    ctx.set_var("AGORA__AUTH__JWT_SECRET", "from-env");

    let config = load().expect("configuration load should honour env overrides");
    assert_eq!(config.http.port, 8080);
    assert_eq!(config.auth.jwt_secret, "from-env");
}

#[test]
#[serial]
fn load_clamps_token_ttl_to_i64_maximum() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    let oversized = (i64::MAX as u128 + 42).to_string();
    ctx.set_var("AGORA__AUTH__TOKEN_TTL_SECONDS", &oversized);

    let config = load().expect("configuration load should succeed with oversized TTL");
    assert_eq!(
        config.auth.token_ttl_seconds,
        i64::MAX as u64,
        "token TTL should be clamped to i64::MAX"
    );
}

#[test]
#[serial]
fn load_replaces_zero_channel_capacity_with_default() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    ctx.set_var("AGORA__REALTIME__CHANNEL_CAPACITY", "0");

    let config = load().expect("configuration load should succeed");
    assert_eq!(
        config.realtime.channel_capacity,
        RealtimeConfig::default().channel_capacity
    );
}

#[test]
#[serial]
fn load_clamps_oversized_channel_capacity() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    ctx.set_var("AGORA__REALTIME__CHANNEL_CAPACITY", "10000000000");

    let config = load().expect("configuration load should succeed");
    assert_eq!(config.realtime.channel_capacity, MAX_CHANNEL_CAPACITY);
}

#[test]
#[serial]
fn load_errors_on_invalid_toml_contents() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    write_config_file(
        temp_dir.path(),
        "agora.toml",
        r#"
        [http]
        port = "not-a-number
        "#,
    );

    let error = load().expect_err("invalid TOML should cause load to fail");
    let message = error.to_string();
    assert!(
        message.contains("invalid configuration") || message.contains("unable to build configuration"),
        "unexpected error message: {message}"
    );
}

#[test]
fn auth_config_defaults_use_token_cookie() {
    let defaults = AuthConfig::default();
    assert_eq!(defaults.cookie_name, "token");
    assert_eq!(defaults.issuer, "agora");
    assert!(!defaults.cookie_secure);
}

#[test]
fn http_config_defaults_match_expected_host_and_port() {
    let defaults = HttpConfig::default();
    assert_eq!(defaults.address, "127.0.0.1");
    assert_eq!(defaults.port, 5000);
}
