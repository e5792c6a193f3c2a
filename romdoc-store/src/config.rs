use std::path::PathBuf;

use crate::error::StoreError;

/// Default URL for the schema text document. Non-secret and stable, so a
/// compiled-in default is acceptable here — unlike the store URL and API key,
/// which must be supplied explicitly at deploy time.
pub const DEFAULT_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/romdoc/platform/refs/heads/main/api/schema.prisma";

/// Connection settings for the remote row store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the PostgREST deployment (no trailing slash).
    pub url: String,
    /// Publishable API key, sent as both `apikey` and bearer token.
    pub api_key: String,
    /// URL of the schema text document.
    pub schema_url: String,
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Hard-coded default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each config field, for `romdoc config show`.
#[derive(Debug)]
pub struct ConfigSources {
    pub url: ConfigSource,
    pub api_key: ConfigSource,
    pub schema_url: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    store: Option<StoreSection>,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct StoreSection {
    url: Option<String>,
    api_key: Option<String>,
    schema_url: Option<String>,
}

impl StoreConfig {
    /// Load config from environment variables or the config file.
    ///
    /// Priority: env vars > config file. The store URL and API key are
    /// required and have no compiled-in fallback; a missing value is a
    /// configuration error so the tool can never silently generate against
    /// a wrong endpoint.
    pub fn load() -> Result<Self, StoreError> {
        let file = load_config_file();

        let url = std::env::var("ROMDOC_STORE_URL")
            .ok()
            .or_else(|| file.as_ref().and_then(|f| f.url.clone()))
            .ok_or_else(|| {
                StoreError::config(
                    "Missing store URL. Set ROMDOC_STORE_URL env var or add to config file",
                )
            })?;

        let api_key = std::env::var("ROMDOC_API_KEY")
            .ok()
            .or_else(|| file.as_ref().and_then(|f| f.api_key.clone()))
            .ok_or_else(|| {
                StoreError::config(
                    "Missing API key. Set ROMDOC_API_KEY env var or add to config file",
                )
            })?;

        let schema_url = std::env::var("ROMDOC_SCHEMA_URL")
            .ok()
            .or_else(|| file.as_ref().and_then(|f| f.schema_url.clone()))
            .unwrap_or_else(|| DEFAULT_SCHEMA_URL.to_string());

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            api_key,
            schema_url,
        })
    }

    /// Apply explicit overrides (e.g., from CLI args).
    pub fn with_overrides(mut self, url: Option<String>, api_key: Option<String>) -> Self {
        if let Some(url) = url {
            self.url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = api_key {
            self.api_key = key;
        }
        self
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("romdoc").join("config.toml"))
}

/// Determine where each config field is coming from.
pub fn config_sources() -> ConfigSources {
    let file = load_config_file();

    let url = if std::env::var("ROMDOC_STORE_URL").is_ok() {
        ConfigSource::EnvVar("ROMDOC_STORE_URL")
    } else if file.as_ref().and_then(|f| f.url.as_ref()).is_some() {
        ConfigSource::ConfigFile
    } else {
        ConfigSource::Missing
    };

    let api_key = if std::env::var("ROMDOC_API_KEY").is_ok() {
        ConfigSource::EnvVar("ROMDOC_API_KEY")
    } else if file.as_ref().and_then(|f| f.api_key.as_ref()).is_some() {
        ConfigSource::ConfigFile
    } else {
        ConfigSource::Missing
    };

    let schema_url = if std::env::var("ROMDOC_SCHEMA_URL").is_ok() {
        ConfigSource::EnvVar("ROMDOC_SCHEMA_URL")
    } else if file.as_ref().and_then(|f| f.schema_url.as_ref()).is_some() {
        ConfigSource::ConfigFile
    } else {
        ConfigSource::Default
    };

    ConfigSources {
        url,
        api_key,
        schema_url,
    }
}

fn load_config_file() -> Option<StoreSection> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    let file: ConfigFile = toml::from_str(&content).ok()?;
    file.store
}
