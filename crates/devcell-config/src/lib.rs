//! Configuration layer for devcell environments.
//!
//! This crate turns a declarative environment document (`config.json`, or a
//! `.toml` equivalent) into an immutable, validated `EnvConfig`: required
//! fields are checked all at once, optional fields receive their defaults,
//! and unknown keys are carried along untouched. Command-line overrides are
//! applied through `ConfigOverrides`, which replaces fields wholesale.

pub mod config;
pub mod loader;

pub use config::{ConfigOverrides, EnvConfig, LogLevel};
pub use loader::{
    default_path, load, load_file, parse_str, DocumentFormat, DEFAULT_CONFIG_FILE, REQUIRED_FIELDS,
};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {}: {diagnostic}", path.display())]
    Malformed { path: PathBuf, diagnostic: String },
    #[error("missing required configuration fields in {}: {}", path.display(), fields.join(", "))]
    MissingFields { path: PathBuf, fields: Vec<String> },
}

impl ConfigError {
    /// Path of the document the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::Malformed { path, .. }
            | Self::MissingFields { path, .. } => path,
        }
    }
}
