//! Log severity levels.
//!
//! The discriminants are part of the public contract: host configuration
//! stores levels by ordinal (`Verbose = 0` … `Fatal = 5`), so the order must
//! never change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered severity of a log record: `Verbose < Debug < … < Fatal`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum LogLevel {
    Verbose = 0,
    #[default]
    Debug = 1,
    Information = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

/// Returned when a string or ordinal does not name a [`LogLevel`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level: {0}")]
pub struct ParseLogLevelError(String);

impl LogLevel {
    /// All levels in ascending order.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Information,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Three-letter upper-case code used in the output template.
    pub fn short_code(self) -> &'static str {
        match self {
            LogLevel::Verbose => "VRB",
            LogLevel::Debug => "DBG",
            LogLevel::Information => "INF",
            LogLevel::Warning => "WRN",
            LogLevel::Error => "ERR",
            LogLevel::Fatal => "FTL",
        }
    }

    /// Inverse of [`short_code`](Self::short_code).
    pub fn from_short_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.short_code() == code)
    }

    /// Closest `tracing` level.  `tracing` has no fatal level, so both
    /// `Error` and `Fatal` map to `ERROR`.
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Verbose => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Information => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error | LogLevel::Fatal => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Verbose => "Verbose",
            LogLevel::Debug => "Debug",
            LogLevel::Information => "Information",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
        };
        f.write_str(name)
    }
}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    /// Accepts the level name in any case, or its three-letter code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| {
                level.to_string().eq_ignore_ascii_case(trimmed)
                    || level.short_code().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ParseLogLevelError(s.to_string()))
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ParseLogLevelError;

    fn try_from(value: u8) -> Result<Self, ParseLogLevelError> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| ParseLogLevelError(value.to_string()))
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level as u8
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
