use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "agora.toml",
    "config/agora.toml",
    "crates/config/agora.toml",
    "../agora.toml",
    "../config/agora.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub realtime: RealtimeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://agora.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Token and cookie settings used when issuing and verifying credentials.
///
/// ```
/// use agora_config::AuthConfig;
///
/// let auth = AuthConfig::default();
/// assert_eq!(auth.cookie_name, "token");
/// assert_eq!(auth.token_ttl_seconds, 86_400);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "AuthConfig::default_issuer")]
    pub issuer: String,
    #[serde(default = "AuthConfig::default_token_ttl")]
    pub token_ttl_seconds: u64,
    #[serde(default = "AuthConfig::default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub cookie_secure: bool,
}

impl AuthConfig {
    fn default_jwt_secret() -> String {
        "change-me-in-production".to_string()
    }

    fn default_issuer() -> String {
        "agora".to_string()
    }

    const fn default_token_ttl() -> u64 {
        86_400
    }

    fn default_cookie_name() -> String {
        "token".to_string()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Self::default_jwt_secret(),
            issuer: Self::default_issuer(),
            token_ttl_seconds: Self::default_token_ttl(),
            cookie_name: Self::default_cookie_name(),
            cookie_secure: false,
        }
    }
}

/// Upper bound for `realtime.channel_capacity`; each chat channel preallocates this many slots.
pub const MAX_CHANNEL_CAPACITY: usize = 65_536;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Buffered events per chat channel before slow subscribers start lagging.
    pub channel_capacity: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 100,
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use agora_config::load;
///
/// std::env::remove_var("AGORA_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let token_ttl = i64::try_from(defaults.auth.token_ttl_seconds).unwrap_or(i64::MAX);
    let channel_capacity =
        i64::try_from(defaults.realtime.channel_capacity).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("auth.jwt_secret", defaults.auth.jwt_secret.clone())?
        .set_default("auth.issuer", defaults.auth.issuer.clone())?
        .set_default("auth.token_ttl_seconds", token_ttl)?
        .set_default("auth.cookie_name", defaults.auth.cookie_name.clone())?
        .set_default("auth.cookie_secure", defaults.auth.cookie_secure)?
        .set_default("realtime.channel_capacity", channel_capacity)?;

    let environment_overrides = config::Environment::with_prefix("AGORA").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("AGORA_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via AGORA_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.token_ttl_seconds > i64::MAX as u64 {
        config.auth.token_ttl_seconds = i64::MAX as u64;
    }

    if config.realtime.channel_capacity == 0 {
        config.realtime.channel_capacity = defaults.realtime.channel_capacity;
    }
    if config.realtime.channel_capacity > MAX_CHANNEL_CAPACITY {
        warn!(
            requested = config.realtime.channel_capacity,
            max = MAX_CHANNEL_CAPACITY,
            "clamping realtime channel capacity"
        );
        config.realtime.channel_capacity = MAX_CHANNEL_CAPACITY;
    }

    debug!(
        address = %config.http.address,
        port = config.http.port,
        database = %config.database.url,
        "loaded backend configuration"
    );
    Ok(config)
}
