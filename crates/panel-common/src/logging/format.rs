//! Output template shared by the console and file sinks:
//!
//! ```text
//! [{application} {HH:mm:ss.ff} {LVL}] {message}
//! {exception}
//! ```
//!
//! The exact severity travels in the `severity` event field because the
//! `tracing` level cannot tell `Error` from `Fatal`.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Local, Timelike};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

use crate::domain::level::LogLevel;

pub(crate) const SEVERITY_FIELD: &str = "severity";
pub(crate) const EXCEPTION_FIELD: &str = "exception";
const MESSAGE_FIELD: &str = "message";

/// `FormatEvent` implementation rendering the channel template.
#[derive(Debug, Clone)]
pub struct ChannelFormat {
    application: String,
}

impl ChannelFormat {
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
        }
    }

    /// Renders one record; `exception` is written on the following line(s).
    pub fn render(
        &self,
        out: &mut impl fmt::Write,
        timestamp: DateTime<Local>,
        level: LogLevel,
        message: &str,
        exception: Option<&str>,
    ) -> fmt::Result {
        let centis = (timestamp.nanosecond() / 10_000_000).min(99);
        writeln!(
            out,
            "[{} {}.{:02} {}] {}",
            self.application,
            timestamp.format("%H:%M:%S"),
            centis,
            level.short_code(),
            message
        )?;
        if let Some(exception) = exception {
            writeln!(out, "{exception}")?;
        }
        Ok(())
    }
}

impl<S, N> FormatEvent<S, N> for ChannelFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = RecordFields::default();
        event.record(&mut fields);

        let level = fields
            .severity
            .as_deref()
            .and_then(LogLevel::from_short_code)
            .unwrap_or_else(|| level_from_tracing(*event.metadata().level()));

        self.render(
            &mut writer,
            Local::now(),
            level,
            &fields.message,
            fields.exception.as_deref(),
        )
    }
}

/// Best-effort mapping for events that carry no `severity` field.
fn level_from_tracing(level: tracing::Level) -> LogLevel {
    match level {
        tracing::Level::TRACE => LogLevel::Verbose,
        tracing::Level::DEBUG => LogLevel::Debug,
        tracing::Level::INFO => LogLevel::Information,
        tracing::Level::WARN => LogLevel::Warning,
        _ => LogLevel::Error,
    }
}

/// Collects the three fields the template uses.
#[derive(Default)]
struct RecordFields {
    message: String,
    severity: Option<String>,
    exception: Option<String>,
}

impl Visit for RecordFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            MESSAGE_FIELD => self.message.push_str(value),
            SEVERITY_FIELD => self.severity = Some(value.to_string()),
            EXCEPTION_FIELD => self.exception = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            MESSAGE_FIELD => {
                let _ = write!(self.message, "{value:?}");
            }
            SEVERITY_FIELD => self.severity = Some(format!("{value:?}")),
            EXCEPTION_FIELD => self.exception = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
