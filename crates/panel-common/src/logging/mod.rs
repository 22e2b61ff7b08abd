//! Per-component log channels.
//!
//! A [`LogChannel`](channel::LogChannel) owns a private `tracing` dispatcher
//! with two sinks:
//!
//! 1. stdout, and
//! 2. a daily-rolled file under `{root}/Components/.../{App}/`.
//!
//! Both render the template
//! `[{application} {HH:mm:ss.ff} {LVL}] {message}` followed by an optional
//! exception block.  After the sinks have been written, the record is fanned
//! out to the subscribers of a [`LogEventBus`](bus::LogEventBus).
//!
//! ```text
//! LogChannel::information("hi")
//!  ├─ tracing::dispatcher::with_default(channel dispatch)
//!  │    ├─ fmt layer → stdout
//!  │    └─ fmt layer → tracing_appender daily file
//!  └─ LogEventBus::publish_record(LogRecord { .. })
//! ```

use std::path::PathBuf;

use thiserror::Error;

pub mod bus;
pub mod channel;
pub mod files;
pub mod format;
pub mod settings;

/// Error type for log channel construction and log directory inspection.
#[derive(Debug, Error)]
pub enum LogError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing log directory {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rolling file sink could not be opened.
    #[error("failed to open log file sink in {path}")]
    FileSink {
        path: PathBuf,
        #[source]
        source: tracing_appender::rolling::InitError,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
