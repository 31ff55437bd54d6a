use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_REDIS_HOST: &str = "localhost";
pub const DEFAULT_REDIS_PORT: u16 = 6379;

#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub redis: RedisConfig,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<Secret<String>>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_REDIS_HOST.to_string(),
            port: DEFAULT_REDIS_PORT,
            password: None,
        }
    }
}

impl RedisConfig {
    /// Read `REDIS_HOST`, `REDIS_PORT` and `REDIS_PASSWORD` through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("REDIS_HOST").unwrap_or_else(|| DEFAULT_REDIS_HOST.to_string());

        let port = match lookup("REDIS_PORT") {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                AppError::ConfigError(anyhow::anyhow!("Invalid REDIS_PORT '{}': {}", raw, e))
            })?,
            None => DEFAULT_REDIS_PORT,
        };

        // An empty password means "no AUTH", same as leaving it unset.
        let password = lookup("REDIS_PASSWORD")
            .filter(|p| !p.is_empty())
            .map(Secret::new);

        Ok(Self {
            host,
            port,
            password,
        })
    }

    /// `redis://` URL for this store, password percent-encoded.
    pub fn connection_url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}:{}/",
                urlencoding::encode(password.expose_secret()),
                self.host,
                self.port
            ),
            None => format!("redis://{}:{}/", self.host, self.port),
        }
    }
}

impl NewsConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| "news-service".to_string()),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            redis: RedisConfig::from_lookup(|key| env::var(key).ok())?,
        })
    }
}
