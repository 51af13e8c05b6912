use crate::config::{
    EnvConfig, LogLevel, DEFAULT_DOCKERFILE_PATH, DEFAULT_NETWORK_MODE, DEFAULT_RUNTIME,
};
use crate::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name looked up in the script directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

pub const REQUIRED_FIELDS: [&str; 3] = ["image_name", "container_name", "container_workdir"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// `.toml` files are read as TOML, everything else as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    image_name: Option<String>,
    container_name: Option<String>,
    container_workdir: Option<String>,
    network_mode: Option<String>,
    dockerfile_path: Option<String>,
    log_level: Option<String>,
    runtime: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

/// Load the document at `path`, or at `default_path` when no path is given.
pub fn load(path: Option<&Path>, default_path: &Path) -> Result<EnvConfig, ConfigError> {
    load_file(path.unwrap_or(default_path))
}

pub fn load_file(path: &Path) -> Result<EnvConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    parse_str(&content, DocumentFormat::from_path(path), path)
}

/// Parse and validate a document. `origin` is only used in error values.
pub fn parse_str(
    input: &str,
    format: DocumentFormat,
    origin: &Path,
) -> Result<EnvConfig, ConfigError> {
    let malformed = |diagnostic: String| ConfigError::Malformed {
        path: origin.to_path_buf(),
        diagnostic,
    };

    let raw: RawDocument = match format {
        DocumentFormat::Json => serde_json::from_str(input).map_err(|e| malformed(e.to_string()))?,
        DocumentFormat::Toml => toml::from_str(input).map_err(|e| malformed(e.to_string()))?,
    };

    let (image_name, container_name, container_workdir) = match (
        required(raw.image_name),
        required(raw.container_name),
        required(raw.container_workdir),
    ) {
        (Some(image), Some(container), Some(workdir)) => (image, container, workdir),
        (image, container, workdir) => {
            let fields = REQUIRED_FIELDS
                .iter()
                .zip([image.is_none(), container.is_none(), workdir.is_none()])
                .filter(|(_, missing)| *missing)
                .map(|(name, _)| (*name).to_owned())
                .collect();
            return Err(ConfigError::MissingFields {
                path: origin.to_path_buf(),
                fields,
            });
        }
    };

    let log_level = match raw.log_level {
        Some(level) => level
            .parse::<LogLevel>()
            .map_err(|e| malformed(e.to_string()))?,
        None => LogLevel::default(),
    };

    let runtime = raw.runtime.unwrap_or_else(|| DEFAULT_RUNTIME.to_owned());
    if runtime.trim().is_empty() {
        return Err(malformed("runtime must not be empty".to_owned()));
    }

    Ok(EnvConfig {
        image_name,
        container_name,
        container_workdir,
        network_mode: raw
            .network_mode
            .unwrap_or_else(|| DEFAULT_NETWORK_MODE.to_owned()),
        dockerfile_path: raw
            .dockerfile_path
            .unwrap_or_else(|| DEFAULT_DOCKERFILE_PATH.to_owned()),
        log_level,
        runtime,
        extra: raw.extra,
    })
}

/// Blank values count as absent.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve the default document location inside `script_dir`.
pub fn default_path(script_dir: &Path) -> PathBuf {
    script_dir.join(DEFAULT_CONFIG_FILE)
}
