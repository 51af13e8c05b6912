use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_NETWORK_MODE: &str = "host";
pub const DEFAULT_DOCKERFILE_PATH: &str = ".";
pub const DEFAULT_RUNTIME: &str = "docker";

/// Severity levels accepted by the `log_level` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`.
    ///
    /// `tracing` has no level above error, so CRITICAL collapses onto it.
    pub fn filter_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLogLevelError(String);

impl fmt::Display for ParseLogLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid log_level '{}', expected one of DEBUG, INFO, WARNING, ERROR, CRITICAL",
            self.0
        )
    }
}

impl std::error::Error for ParseLogLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            _ => Err(ParseLogLevelError(s.to_owned())),
        }
    }
}

/// Validated environment configuration.
///
/// Every field is populated once construction succeeds; optional keys have
/// already been defaulted. The record is read-only apart from
/// [`EnvConfig::with_overrides`], which produces a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub(crate) image_name: String,
    pub(crate) container_name: String,
    pub(crate) container_workdir: String,
    pub(crate) network_mode: String,
    pub(crate) dockerfile_path: String,
    pub(crate) log_level: LogLevel,
    pub(crate) runtime: String,
    pub(crate) extra: BTreeMap<String, serde_json::Value>,
}

impl EnvConfig {
    /// Build a record from the three required values, defaulting the rest.
    pub fn new(
        image_name: impl Into<String>,
        container_name: impl Into<String>,
        container_workdir: impl Into<String>,
    ) -> Self {
        Self {
            image_name: image_name.into(),
            container_name: container_name.into(),
            container_workdir: container_workdir.into(),
            network_mode: DEFAULT_NETWORK_MODE.to_owned(),
            dockerfile_path: DEFAULT_DOCKERFILE_PATH.to_owned(),
            log_level: LogLevel::default(),
            runtime: DEFAULT_RUNTIME.to_owned(),
            extra: BTreeMap::new(),
        }
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    pub fn container_workdir(&self) -> &str {
        &self.container_workdir
    }

    pub fn network_mode(&self) -> &str {
        &self.network_mode
    }

    pub fn dockerfile_path(&self) -> &str {
        &self.dockerfile_path
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Container runtime executable (`docker`, `podman`, ...).
    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    /// Keys present in the document that devcell does not interpret.
    pub fn extra(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extra
    }

    /// Return a copy with every supplied override replacing its field.
    #[must_use]
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        let mut next = self.clone();
        if let Some(image) = &overrides.image_name {
            next.image_name.clone_from(image);
        }
        if let Some(network) = &overrides.network_mode {
            next.network_mode.clone_from(network);
        }
        if let Some(runtime) = &overrides.runtime {
            next.runtime.clone_from(runtime);
        }
        next
    }
}

/// Values supplied on the command line that take precedence over the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub image_name: Option<String>,
    pub network_mode: Option<String>,
    pub runtime: Option<String>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.image_name.is_none() && self.network_mode.is_none() && self.runtime.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults() {
        let config = EnvConfig::new("x:1", "c1", "/app");
        assert_eq!(config.network_mode(), "host");
        assert_eq!(config.dockerfile_path(), ".");
        assert_eq!(config.log_level(), LogLevel::Info);
        assert_eq!(config.runtime(), "docker");
        assert!(config.extra().is_empty());
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!(" CRITICAL ".parse::<LogLevel>().unwrap(), LogLevel::Critical);
    }

    #[test]
    fn log_level_rejects_unknown_names() {
        let err = "verbose".parse::<LogLevel>().unwrap_err();
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn log_level_display_roundtrips() {
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn critical_maps_to_error_filter() {
        assert_eq!(LogLevel::Critical.filter_directive(), "error");
        assert_eq!(LogLevel::Warning.filter_directive(), "warn");
    }

    #[test]
    fn override_replaces_image_only() {
        let config = EnvConfig::new("x:1", "c1", "/app");
        let overridden = config.with_overrides(&ConfigOverrides {
            image_name: Some("x:2".to_owned()),
            ..ConfigOverrides::default()
        });
        assert_eq!(overridden.image_name(), "x:2");
        assert_eq!(overridden.container_name(), "c1");
        assert_eq!(overridden.container_workdir(), "/app");
        assert_eq!(overridden.network_mode(), "host");
        // The original record is untouched.
        assert_eq!(config.image_name(), "x:1");
    }

    #[test]
    fn override_replaces_wholesale() {
        let config = EnvConfig::new("x:1", "c1", "/app");
        let overridden = config.with_overrides(&ConfigOverrides {
            network_mode: Some(String::new()),
            runtime: Some("podman".to_owned()),
            ..ConfigOverrides::default()
        });
        assert_eq!(overridden.network_mode(), "");
        assert_eq!(overridden.runtime(), "podman");
    }

    #[test]
    fn empty_overrides_are_identity() {
        let config = EnvConfig::new("x:1", "c1", "/app");
        let overrides = ConfigOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(config.with_overrides(&overrides), config);
    }
}
