pub mod client;
pub mod config;
pub mod error;

pub use client::{StoreClient, active_filter, eq_filter, select};
pub use config::{
    ConfigSource, ConfigSources, DEFAULT_SCHEMA_URL, StoreConfig, config_path, config_sources,
};
pub use error::StoreError;
