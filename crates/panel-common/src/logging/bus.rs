//! Record subscribers.
//!
//! A [`LogEventBus`] holds two append-ordered observer lists: one for plain
//! records and one for exception records.  Channels publish to the bus after
//! their sinks have been written.
//!
//! A lazily created process-wide bus is available through
//! [`LogEventBus::global`]; channels use it unless they were built with an
//! explicit bus, so plugins that subscribe before any channel exists still
//! receive every record.
//!
//! Publishing snapshots the handler list and releases the lock before calling
//! out, so handlers may subscribe or unsubscribe from inside a callback.  Each
//! handler runs isolated: a panic is reported and the next handler still runs.

use std::error::Error as StdError;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::Dispatch;
use uuid::Uuid;

use crate::domain::level::LogLevel;

/// A record written through a channel.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    /// The channel's internal dispatcher.
    pub logger: &'a Dispatch,
    pub message: &'a str,
    pub application: &'a str,
}

/// An error written through [`LogChannel::log_exception`](crate::LogChannel::log_exception).
#[derive(Clone, Copy)]
pub struct ExceptionRecord<'a> {
    /// Always [`LogLevel::Error`].
    pub level: LogLevel,
    pub logger: &'a Dispatch,
    pub error: &'a (dyn StdError + 'a),
    pub application: &'a str,
}

impl std::fmt::Debug for ExceptionRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExceptionRecord")
            .field("level", &self.level)
            .field("error", &self.error.to_string())
            .field("application", &self.application)
            .finish()
    }
}

/// Handle returned by `subscribe_*`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

type RecordHandler = Arc<dyn Fn(&LogRecord<'_>) + Send + Sync>;
type ExceptionHandler = Arc<dyn Fn(&ExceptionRecord<'_>) + Send + Sync>;

/// Observer lists for log records and exception records.
#[derive(Default)]
pub struct LogEventBus {
    records: RwLock<Vec<(SubscriptionId, RecordHandler)>>,
    exceptions: RwLock<Vec<(SubscriptionId, ExceptionHandler)>>,
}

static GLOBAL_BUS: OnceLock<Arc<LogEventBus>> = OnceLock::new();

impl LogEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide bus used by channels built without an explicit one.
    pub fn global() -> Arc<LogEventBus> {
        Arc::clone(GLOBAL_BUS.get_or_init(|| Arc::new(LogEventBus::new())))
    }

    /// Registers a handler for every record written through a channel.
    pub fn subscribe_records<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&LogRecord<'_>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));
        id
    }

    /// Registers a handler for every exception written through a channel.
    pub fn subscribe_exceptions<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ExceptionRecord<'_>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.exceptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));
        id
    }

    /// Removes a handler from whichever list holds it.
    ///
    /// Returns `false` if the id is unknown (already removed).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let before = records.len();
        records.retain(|(existing, _)| *existing != id);
        if records.len() != before {
            return true;
        }
        drop(records);

        let mut exceptions = self
            .exceptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = exceptions.len();
        exceptions.retain(|(existing, _)| *existing != id);
        exceptions.len() != before
    }

    pub fn record_subscriber_count(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn exception_subscriber_count(&self) -> usize {
        self.exceptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Invokes every record handler in registration order.
    pub fn publish_record(&self, record: &LogRecord<'_>) {
        let handlers: Vec<RecordHandler> = self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(record))).is_err() {
                tracing::warn!(
                    application = record.application,
                    "log record subscriber panicked; continuing with remaining subscribers"
                );
            }
        }
    }

    /// Invokes every exception handler in registration order.
    pub fn publish_exception(&self, record: &ExceptionRecord<'_>) {
        let handlers: Vec<ExceptionHandler> = self
            .exceptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(record))).is_err() {
                tracing::warn!(
                    application = record.application,
                    "log exception subscriber panicked; continuing with remaining subscribers"
                );
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
