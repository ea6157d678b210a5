//! Server configuration: TOML file with environment overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration, all sections optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset location.
    pub data: DataConfig,
    /// HTTP listener.
    pub http: HttpConfig,
    /// Logging defaults.
    pub logging: LoggingConfig,
}

/// Dataset location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the prepared filing CSV.
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("final_with_CCTI.csv") }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Socket address to bind.
    pub listen: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { listen: "127.0.0.1:8000".to_string() }
    }
}

/// Logging defaults; `RUST_LOG` overrides at runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter directive.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl Config {
    /// Load from `filinglens.toml` (or `FILINGLENS_CONFIG`), falling back
    /// to defaults when the file does not exist, then apply
    /// `FILINGLENS_DATA` and `FILINGLENS_LISTEN` overrides.
    ///
    /// # Errors
    /// Fails when the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = std::env::var("FILINGLENS_CONFIG")
            .unwrap_or_else(|_| "filinglens.toml".to_string());
        let mut config = Self::from_file(Path::new(&path))?;

        if let Ok(data) = std::env::var("FILINGLENS_DATA") {
            config.data.path = PathBuf::from(data);
        }
        if let Ok(listen) = std::env::var("FILINGLENS_LISTEN") {
            config.http.listen = listen;
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }
}
