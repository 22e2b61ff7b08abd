//! Logger settings.
//!
//! Settings are a plain serde struct so a plugin can persist them with
//! [`LocalConfiguration`](crate::LocalConfiguration) alongside its own
//! configuration.  The only value read from the environment is the host log
//! path, [`LOG_PATH_ENV`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::level::LogLevel;
use crate::domain::paths;

/// Environment variable carrying the host's log directory.
///
/// When present and non-empty, log trees are rooted at `{value}/..` instead
/// of the working directory.
pub const LOG_PATH_ENV: &str = "TCAdmin.LogPath";

/// Settings applied to every [`LogChannel`](crate::LogChannel) built with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LoggerSettings {
    /// Records below this level are not written to the sinks.
    pub minimum_level: LogLevel,
    /// Root that `Components/` lives under when no override is set.
    pub base_dir: PathBuf,
    /// Host log directory; see [`LOG_PATH_ENV`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path_override: Option<PathBuf>,
    /// Whether records are echoed to stdout.
    pub console: bool,
}

crate::component!(LoggerSettings);

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            minimum_level: LogLevel::Debug,
            base_dir: PathBuf::from("."),
            log_path_override: None,
            console: true,
        }
    }
}

impl LoggerSettings {
    /// Default settings with the host log path taken from [`LOG_PATH_ENV`].
    pub fn from_env() -> Self {
        Self {
            log_path_override: std::env::var_os(LOG_PATH_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Returns a copy rooted at `base_dir`.
    pub fn with_base_dir(mut self, base_dir: impl AsRef<Path>) -> Self {
        self.base_dir = base_dir.as_ref().to_path_buf();
        self
    }

    /// Returns a copy with the given minimum level.
    pub fn with_minimum_level(mut self, level: LogLevel) -> Self {
        self.minimum_level = level;
        self
    }

    /// Directory that `Components/` is resolved against.
    pub fn log_root(&self) -> PathBuf {
        match &self.log_path_override {
            Some(host_path) if !host_path.as_os_str().is_empty() => {
                paths::overridden_root(host_path)
            }
            _ => self.base_dir.clone(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = LoggerSettings::default();
        assert_eq!(settings.minimum_level, LogLevel::Debug);
        assert_eq!(settings.base_dir, PathBuf::from("."));
        assert!(settings.log_path_override.is_none());
        assert!(settings.console);
    }

    #[test]
    fn test_log_root_without_override_is_base_dir() {
        let settings = LoggerSettings::default().with_base_dir("/srv/panel");
        assert_eq!(settings.log_root(), PathBuf::from("/srv/panel"));
    }

    #[test]
    fn test_log_root_with_override_is_override_parent() {
        // Arrange
        let settings = LoggerSettings {
            log_path_override: Some(PathBuf::from("/var/tc/logs")),
            ..LoggerSettings::default()
        };

        // Act / Assert
        assert_eq!(settings.log_root(), PathBuf::from("/var/tc/logs/.."));
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let settings = LoggerSettings {
            log_path_override: Some(PathBuf::new()),
            ..LoggerSettings::default()
        };
        assert_eq!(settings.log_root(), PathBuf::from("."));
    }

    #[test]
    fn test_descriptor_places_settings_under_logging_namespace() {
        use crate::Component;
        let descriptor = LoggerSettings::descriptor();
        assert_eq!(descriptor.assembly(), "panel_common");
        assert_eq!(descriptor.trimmed_namespace(), "logging.settings");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        // Arrange: only the level is present
        let json = r#"{ "MinimumLevel": "Warning" }"#;

        // Act
        let settings: LoggerSettings = serde_json::from_str(json).expect("deserialize");

        // Assert
        assert_eq!(settings.minimum_level, LogLevel::Warning);
        assert!(settings.console);
        assert_eq!(settings.base_dir, PathBuf::from("."));
    }
}
