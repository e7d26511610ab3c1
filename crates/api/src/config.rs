//! Server configuration read from the environment.

use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;

/// Origins allowed to read the API cross-origin when `CORS_ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:8080",
    "http://localhost:3000",
    "https://movies.com",
    "https://midu.dev",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {value:?}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("HOST must be an IP address, got {value:?}")]
    InvalidHost {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    /// JSON file replacing the built-in dataset.
    pub seed_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            seed_path: None,
        }
    }
}

impl ApiConfig {
    /// Read `HOST`, `PORT`, `CORS_ALLOWED_ORIGINS` and `MOVIES_SEED_PATH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = non_blank(lookup("PORT")) {
            config.port = value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?;
        } else {
            tracing::debug!(port = DEFAULT_PORT, "PORT not set; using default");
        }

        if let Some(value) = non_blank(lookup("HOST")) {
            config.host = value
                .parse()
                .map_err(|source| ConfigError::InvalidHost { value, source })?;
        }

        if let Some(value) = lookup("CORS_ALLOWED_ORIGINS") {
            config.allowed_origins = value
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
            if config.allowed_origins.is_empty() {
                tracing::warn!("CORS_ALLOWED_ORIGINS is empty; cross-origin requests will be refused");
            }
        }

        config.seed_path = non_blank(lookup("MOVIES_SEED_PATH")).map(PathBuf::from);

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.socket_addr().port(), 3000);
        assert_eq!(config.allowed_origins.len(), 4);
        assert!(config.allowed_origins.iter().any(|o| o == "https://movies.com"));
    }

    #[test]
    fn port_and_host_are_parsed() {
        let config =
            ApiConfig::from_lookup(lookup(&[("PORT", "8081"), ("HOST", "127.0.0.1")])).unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:8081".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = ApiConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(ApiConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn bad_host_is_an_error() {
        let err = ApiConfig::from_lookup(lookup(&[("HOST", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHost { .. }));
    }

    #[test]
    fn origins_are_comma_separated_and_trimmed() {
        let config = ApiConfig::from_lookup(lookup(&[(
            "CORS_ALLOWED_ORIGINS",
            " https://a.example , ,http://b.example:8080",
        )]))
        .unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "http://b.example:8080"]
        );
    }

    #[test]
    fn seed_path_is_optional() {
        let config = ApiConfig::from_lookup(lookup(&[("MOVIES_SEED_PATH", "/tmp/m.json")])).unwrap();
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/m.json")));
        let config = ApiConfig::from_lookup(lookup(&[("MOVIES_SEED_PATH", "  ")])).unwrap();
        assert_eq!(config.seed_path, None);
    }
}
