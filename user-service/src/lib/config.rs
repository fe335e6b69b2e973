use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Signing secret used when none is configured. Development only.
pub const DEVELOPMENT_JWT_SECRET: &str = "user-service-jwt-secret-for-development-only";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    pub blacklist: BlacklistConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default = "default_jwt_secret")]
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// Whether the insecure development secret is in use.
    pub fn uses_development_secret(&self) -> bool {
        self.secret == DEVELOPMENT_JWT_SECRET
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_jwt_secret(),
            expiration_hours: default_expiration_hours(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BlacklistConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_jwt_secret() -> String {
    DEVELOPMENT_JWT_SECRET.to_string()
}

fn default_expiration_hours() -> i64 {
    auth::Claims::DEFAULT_VALIDITY_HOURS
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, BLACKLIST__BASE_URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: BLACKLIST__BASE_URL=https://... overrides blacklist.base_url
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}
