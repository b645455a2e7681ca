use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::Config as ConfigBuilder;
use config::ConfigBuilder as Builder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::auth::models::AuthConfig;
use crate::auth::models::DEFAULT_LOOKUP_TIMEOUT_MS;
use crate::auth::models::DEFAULT_TOKEN_LIFETIME_DAYS;
use crate::inbound::http::router::RouterOptions;

/// Shortest signing secret accepted for HS256.
pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
    /// Bound on each credential lookup made while authenticating.
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_token_lifetime_days")]
    pub token_lifetime_days: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"**redacted**")
            .field("token_lifetime_days", &self.token_lifetime_days)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_ms() -> u64 {
    3_000
}

fn default_lookup_timeout_ms() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT_MS
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_token_lifetime_days() -> i64 {
    DEFAULT_TOKEN_LIFETIME_DAYS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// `CORS__ALLOWED_ORIGINS` takes a comma separated list.
    ///
    /// # Errors
    /// * Missing or malformed keys, including an absent `jwt.secret`
    /// * Values rejected by [`Config::validate`]
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Self::environment());

        Self::from_builder(builder)
    }

    /// Unprefixed variables, `__` between section and key.
    fn environment() -> Environment {
        Environment::default()
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("cors.allowed_origins")
            .try_parsing(true)
    }

    fn from_builder(builder: Builder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run safely with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }
        if self.jwt.token_lifetime_days <= 0 {
            return Err(ConfigError::Message(
                "jwt.token_lifetime_days must be positive".to_string(),
            ));
        }
        if self.database.lookup_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "database.lookup_timeout_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings for the login and token components.
    pub fn auth(&self) -> AuthConfig {
        AuthConfig::new(self.jwt.secret.clone())
            .with_token_lifetime(chrono::Duration::days(self.jwt.token_lifetime_days))
            .with_lookup_timeout(Duration::from_millis(self.database.lookup_timeout_ms))
    }

    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            allowed_origins: self.cors.allowed_origins.clone(),
            static_dir: self.server.static_dir.clone(),
        }
    }
}
