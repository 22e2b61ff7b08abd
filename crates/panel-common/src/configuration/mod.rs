//! Typed JSON configuration persistence.
//!
//! Reads and writes a value of type `T` to
//! `{base}/Components/{crate}/Configurations/{module}/{Name}.json`.
//!
//! # Failure policy
//!
//! Configuration is never allowed to take a plugin down.  Every I/O or parse
//! failure is logged through the store's paired [`LogChannel`] and replaced by
//! a safe value: reads fall back to `T::default()` (without persisting it) and
//! writes report `false`.
//!
//! ```rust,no_run
//! use panel_common::{component, ConfigurationProvider, LocalConfiguration};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! pub struct MotdSettings {
//!     pub message: String,
//!     pub interval_secs: u32,
//! }
//! component!(MotdSettings);
//!
//! let store = LocalConfiguration::<MotdSettings>::new();
//! let mut settings = store.get_configuration();
//! settings.interval_secs = 300;
//! store.set_configuration(&settings);
//! ```
//!
//! [`LogChannel`]: crate::LogChannel

use std::path::PathBuf;

use thiserror::Error;

mod local;

pub use local::{ConfigurationBuilder, LocalConfiguration};

/// Error type for configuration file operations.
///
/// Never returned to callers of [`ConfigurationProvider`]; it is logged and
/// converted into the documented fallback.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON content could not be parsed into the configuration type.
    #[error("failed to parse config JSON at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The value could not be serialized to JSON.
    #[error("failed to serialize config")]
    Serialize(#[source] serde_json::Error),
}

/// Source of a typed configuration value.
pub trait ConfigurationProvider<T> {
    /// Returns the current value, or a default when none can be read.
    fn get_configuration(&self) -> T;

    /// Persists `config`.  Returns `false` if it could not be written.
    fn set_configuration(&self, config: &T) -> bool;

    /// Alias for [`set_configuration`](Self::set_configuration).
    fn save_configuration(&self, config: &T) -> bool {
        self.set_configuration(config)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
