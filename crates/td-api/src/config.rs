//! API server configuration, loadable from TOML or environment.

use serde::Deserialize;

use crate::backend::{BackendConfig, default_timeout_secs};

/// Top-level API server configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Intent backend. None records intents without forwarding them.
    #[serde(default)]
    pub backend: Option<BackendConfig>,
    /// Allowed CORS origins (e.g., ["http://localhost:5173"]). Empty allows any.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl ApiConfig {
    /// Load from the TOML file named by `TD_CONFIG`, else from `TD_*` env vars.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("TD_CONFIG") {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::from_env()),
        }
    }

    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("TD_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid TD_PORT, using default");
                defaults.port
            }),
            None => defaults.port,
        };

        let backend = lookup("TD_BACKEND_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| BackendConfig {
                url: url.trim().to_string(),
                timeout_secs: lookup("TD_BACKEND_TIMEOUT_SECS")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or_else(default_timeout_secs),
            });

        let cors_origins = lookup("TD_CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host: lookup("TD_HOST").unwrap_or(defaults.host),
            port,
            backend,
            cors_origins,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            backend: None,
            cors_origins: vec![],
        }
    }
}
