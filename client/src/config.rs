//! Client configuration
//!
//! Loaded the same way as the server's: defaults in code, then an optional
//! `config/client.toml`, then `STOCKROOM_CLIENT__` environment variables
//! (e.g. `STOCKROOM_CLIENT__API__BASE_URL`).

use config::{ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Server root, without the `/api/v1` prefix
    pub base_url: String,

    /// Bearer token sent with every request, if set
    #[serde(default)]
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .set_default("api.base_url", "http://localhost:8000")?
            .add_source(File::with_name("config/client").required(false))
            .add_source(
                Environment::with_prefix("STOCKROOM_CLIENT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                token: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_server() {
        let config = ClientConfig::load().unwrap();
        assert!(config.api.base_url.starts_with("http"));
    }

    #[test]
    fn test_new_has_no_token() {
        let config = ClientConfig::new("http://127.0.0.1:9000");
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert!(config.api.token.is_none());
    }
}
