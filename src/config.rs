//! Process configuration read from environment variables.

use std::env;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:2330",
    "https://thecorporategirliearts.netlify.app",
];

/// Errors raised while assembling the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
}

/// Settings shared by `main` and the request handlers.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// HS256 secret used to verify admin bearer tokens.
    pub admin_jwt_secret: String,
    /// Origins allowed by the CORS policy.
    pub allowed_origins: Vec<String>,
    /// Production deployments mark the guest cookie as `Secure`.
    pub production: bool,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let address = lookup("ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let admin_jwt_secret = lookup("ADMIN_JWT_SECRET")
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing("ADMIN_JWT_SECRET"))?;

        let allowed_origins = match lookup("ALLOWED_ORIGINS") {
            Some(value) => parse_origins(&value),
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
        };

        let production = lookup("APP_ENV")
            .map(|value| value.trim().eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            address,
            port,
            admin_jwt_secret,
            allowed_origins,
            production,
        })
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
