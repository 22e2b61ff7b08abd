//! `LogChannel`: a named, optionally typed log stream.
//!
//! # Constructing a channel
//!
//! ```rust,no_run
//! use panel_common::{component, LogChannel};
//!
//! struct MotdPlugin;
//! component!(MotdPlugin);
//!
//! // Application name = "MotdPlugin", file under
//! // ./Components/{crate}/Logs/{module}/MotdPlugin/MotdPlugin.log
//! let log = LogChannel::for_type::<MotdPlugin>();
//! log.information("plugin loaded");
//!
//! // Untyped: ./Components/Misc/Logs/Updater/Updater.log
//! let misc = LogChannel::new("Updater");
//! misc.warning("no update server configured");
//! ```

use std::error::Error as StdError;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::Dispatch;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

use super::bus::{ExceptionRecord, LogEventBus, LogRecord};
use super::files::{self, LogFile};
use super::format::ChannelFormat;
use super::settings::LoggerSettings;
use super::LogError;
use crate::domain::descriptor::{Component, TypeDescriptor};
use crate::domain::level::LogLevel;
use crate::domain::paths;

/// Emits one event on the current default dispatcher at a fixed `tracing`
/// level.  The level must be a constant, hence one arm per level below.
macro_rules! emit_event {
    ($level:ident, $severity:expr, $message:expr, $exception:expr) => {
        match $exception {
            Some(exception) => tracing::event!(
                target: "panel_common::channel",
                tracing::Level::$level,
                severity = $severity,
                exception = %exception,
                "{}",
                $message
            ),
            None => tracing::event!(
                target: "panel_common::channel",
                tracing::Level::$level,
                severity = $severity,
                "{}",
                $message
            ),
        }
    };
}

/// A log stream writing to stdout and a daily-rolled file, then notifying
/// the subscribers of its [`LogEventBus`].
pub struct LogChannel {
    application: String,
    carrier: Option<TypeDescriptor>,
    log_path: PathBuf,
    minimum_level: LogLevel,
    dispatch: Dispatch,
    bus: Arc<LogEventBus>,
}

impl std::fmt::Debug for LogChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogChannel")
            .field("application", &self.application)
            .field("carrier", &self.carrier)
            .field("log_path", &self.log_path)
            .field("minimum_level", &self.minimum_level)
            .finish_non_exhaustive()
    }
}

impl LogChannel {
    /// Untyped channel, logging under `Components/Misc/Logs/{application}/`.
    pub fn new(application: impl Into<String>) -> Self {
        Self::builder(application).build()
    }

    /// Channel for `T`, named after the type's short name.
    pub fn for_type<T: Component>() -> Self {
        let carrier = T::descriptor();
        Self::builder(carrier.short_name()).carrier(carrier).build()
    }

    /// Channel for `T` with an explicit application name.
    pub fn for_type_named<T: Component>(application: impl Into<String>) -> Self {
        Self::builder(application).carrier(T::descriptor()).build()
    }

    pub fn builder(application: impl Into<String>) -> LogChannelBuilder {
        LogChannelBuilder {
            application: application.into(),
            carrier: None,
            settings: None,
            bus: None,
        }
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn carrier(&self) -> Option<&TypeDescriptor> {
        self.carrier.as_ref()
    }

    /// Path of the un-rolled log file, `.../{App}/{App}.log`.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Directory holding this channel's rolled log files.
    pub fn log_directory(&self) -> &Path {
        self.log_path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn minimum_level(&self) -> LogLevel {
        self.minimum_level
    }

    /// The `tracing` dispatcher that owns this channel's sinks.
    pub fn internal_logger(&self) -> &Dispatch {
        &self.dispatch
    }

    pub fn event_bus(&self) -> &Arc<LogEventBus> {
        &self.bus
    }

    /// Writes `message` at `level`, then notifies record subscribers.
    pub fn log_message(&self, level: LogLevel, message: &str) {
        self.write(level, message, None);
        self.bus.publish_record(&LogRecord {
            level,
            logger: &self.dispatch,
            message,
            application: &self.application,
        });
    }

    pub fn verbose(&self, message: &str) {
        self.log_message(LogLevel::Verbose, message);
    }

    pub fn debug(&self, message: &str) {
        self.log_message(LogLevel::Debug, message);
    }

    pub fn information(&self, message: &str) {
        self.log_message(LogLevel::Information, message);
    }

    pub fn warning(&self, message: &str) {
        self.log_message(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log_message(LogLevel::Error, message);
    }

    pub fn fatal(&self, message: &str) {
        self.log_message(LogLevel::Fatal, message);
    }

    /// Writes `error` at `Error` level, using its message as the record text
    /// and its source chain as the exception block, then notifies exception
    /// subscribers.
    pub fn log_exception(&self, error: &(dyn StdError + '_)) {
        let message = error.to_string();
        let chain = render_error_chain(error);
        self.write(LogLevel::Error, &message, Some(&chain));
        self.bus.publish_exception(&ExceptionRecord {
            level: LogLevel::Error,
            logger: &self.dispatch,
            error,
            application: &self.application,
        });
    }

    /// Every file in the log directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Io`] if the directory cannot be created or read.
    pub fn log_files(&self) -> Result<Vec<LogFile>, LogError> {
        files::list_log_files(self.log_directory())
    }

    /// The most recently modified file in the log directory, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Io`] if the directory cannot be created or read.
    pub fn current_log_file(&self) -> Result<Option<LogFile>, LogError> {
        Ok(files::most_recent(self.log_files()?))
    }

    fn write(&self, level: LogLevel, message: &str, exception: Option<&str>) {
        if level < self.minimum_level {
            return;
        }
        let severity = level.short_code();
        tracing::dispatcher::with_default(&self.dispatch, || match level {
            LogLevel::Verbose => emit_event!(TRACE, severity, message, exception),
            LogLevel::Debug => emit_event!(DEBUG, severity, message, exception),
            LogLevel::Information => emit_event!(INFO, severity, message, exception),
            LogLevel::Warning => emit_event!(WARN, severity, message, exception),
            LogLevel::Error | LogLevel::Fatal => emit_event!(ERROR, severity, message, exception),
        });
    }
}

/// Builder for [`LogChannel`].
///
/// Without explicit settings the builder uses [`LoggerSettings::from_env`];
/// without an explicit bus it uses [`LogEventBus::global`].
pub struct LogChannelBuilder {
    application: String,
    carrier: Option<TypeDescriptor>,
    settings: Option<LoggerSettings>,
    bus: Option<Arc<LogEventBus>>,
}

impl LogChannelBuilder {
    pub fn carrier(mut self, carrier: TypeDescriptor) -> Self {
        self.carrier = Some(carrier);
        self
    }

    pub fn settings(mut self, settings: LoggerSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn event_bus(mut self, bus: Arc<LogEventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Builds the channel, failing if the file sink cannot be opened.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::FileSink`] if the log directory or file cannot be
    /// created.
    pub fn try_build(self) -> Result<LogChannel, LogError> {
        let parts = self.resolve();
        let directory = parts.directory();
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(parts.application.as_str())
            .filename_suffix("log")
            .build(&directory)
            .map_err(|source| LogError::FileSink {
                path: directory.clone(),
                source,
            })?;
        Ok(parts.into_channel(Some(appender)))
    }

    /// Builds the channel; if the file sink cannot be opened the channel
    /// logs to the console only and a warning is emitted.
    pub fn build(self) -> LogChannel {
        let parts = self.resolve();
        let directory = parts.directory();
        match RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(parts.application.as_str())
            .filename_suffix("log")
            .build(&directory)
        {
            Ok(appender) => parts.into_channel(Some(appender)),
            Err(err) => {
                tracing::warn!(
                    application = %parts.application,
                    directory = %directory.display(),
                    "log file sink unavailable, falling back to console only: {err}"
                );
                parts.into_channel(None)
            }
        }
    }

    fn resolve(self) -> ChannelParts {
        let settings = self.settings.unwrap_or_else(LoggerSettings::from_env);
        let log_path = paths::log_path(
            &settings.log_root(),
            self.carrier.as_ref(),
            &self.application,
        );
        ChannelParts {
            application: self.application,
            carrier: self.carrier,
            log_path,
            settings,
            bus: self.bus.unwrap_or_else(LogEventBus::global),
        }
    }
}

struct ChannelParts {
    application: String,
    carrier: Option<TypeDescriptor>,
    log_path: PathBuf,
    settings: LoggerSettings,
    bus: Arc<LogEventBus>,
}

impl ChannelParts {
    fn directory(&self) -> PathBuf {
        self.log_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn into_channel(self, appender: Option<RollingFileAppender>) -> LogChannel {
        let console = self.settings.console.then(|| {
            tracing_subscriber::fmt::layer()
                .event_format(ChannelFormat::new(self.application.clone()))
                .with_writer(std::io::stdout)
                .with_ansi(false)
        });
        let file = appender.map(|appender| {
            tracing_subscriber::fmt::layer()
                .event_format(ChannelFormat::new(self.application.clone()))
                .with_writer(appender)
                .with_ansi(false)
        });
        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::TRACE)
            .with(console)
            .with(file);

        LogChannel {
            application: self.application,
            carrier: self.carrier,
            log_path: self.log_path,
            minimum_level: self.settings.minimum_level,
            dispatch: Dispatch::new(subscriber),
            bus: self.bus,
        }
    }
}

/// `error` followed by one `  caused by: …` line per source.
pub(crate) fn render_error_chain(error: &(dyn StdError + '_)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(rendered, "\n  caused by: {cause}");
        source = cause.source();
    }
    rendered
}

// ── Tests ─────────────────────────────────────────────────────────────────────
