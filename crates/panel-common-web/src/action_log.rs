//! `RequestActionLog`: logs each controller action as it starts executing.
//!
//! With `debug` enabled every request produces a block like:
//!
//! ```text
//! |------------------------Request Received------------------------|
//! Controller: Motd
//! Action: Save
//! Event Type: OnActionExecuting
//! |--- id = 4
//! |----------------------------------------------------------------|
//! ```
//!
//! written at `Debug` to an untyped log channel named after `log_name`.

use std::fmt::Display;
use std::sync::{Arc, OnceLock};

use panel_common::{LogChannel, LogEventBus, LoggerSettings};

/// Log name used when none is given.
pub const DEFAULT_LOG_NAME: &str = "Panel.Common";

const REQUEST_RECEIVED: &str =
    "|------------------------Request Received------------------------|";
const SEPARATOR: &str = "|----------------------------------------------------------------|";

/// The routing data and bound parameters of an action about to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    pub controller: String,
    pub action: String,
    /// Parameters in binding order, already rendered as text.
    pub parameters: Vec<(String, String)>,
}

impl ActionContext {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.parameters.push((name.into(), value.to_string()));
        self
    }
}

/// Action filter that logs incoming requests.
pub struct RequestActionLog {
    log_name: String,
    debug: bool,
    settings: Option<LoggerSettings>,
    bus: Option<Arc<LogEventBus>>,
    channel: OnceLock<LogChannel>,
}

impl std::fmt::Debug for RequestActionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestActionLog")
            .field("log_name", &self.log_name)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl Default for RequestActionLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_NAME, false)
    }
}

impl RequestActionLog {
    pub fn new(log_name: impl Into<String>, debug: bool) -> Self {
        Self {
            log_name: log_name.into(),
            debug,
            settings: None,
            bus: None,
            channel: OnceLock::new(),
        }
    }

    /// Settings for the log channel, instead of [`LoggerSettings::from_env`].
    pub fn with_settings(mut self, settings: LoggerSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Event bus for the log channel, instead of the global one.
    pub fn with_event_bus(mut self, bus: Arc<LogEventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn log_name(&self) -> &str {
        &self.log_name
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Renders the request block for `context`, writes it when `debug` is
    /// set, and returns the rendered entries.
    pub fn on_action_executing(&self, context: &ActionContext) -> Vec<String> {
        self.log("OnActionExecuting", context)
    }

    fn log(&self, event_type: &str, context: &ActionContext) -> Vec<String> {
        let entries = render(event_type, context);
        if self.debug {
            let channel = self.channel();
            for entry in &entries {
                channel.debug(entry);
            }
        }
        entries
    }

    /// The channel is opened on first use so that non-debug filters never
    /// create a log directory.
    fn channel(&self) -> &LogChannel {
        self.channel.get_or_init(|| {
            let mut builder = LogChannel::builder(self.log_name.as_str());
            if let Some(settings) = &self.settings {
                builder = builder.settings(settings.clone());
            }
            if let Some(bus) = &self.bus {
                builder = builder.event_bus(Arc::clone(bus));
            }
            builder.build()
        })
    }
}

fn render(event_type: &str, context: &ActionContext) -> Vec<String> {
    let mut entries = Vec::with_capacity(context.parameters.len() + 3);
    entries.push(REQUEST_RECEIVED.to_string());
    entries.push(format!(
        "Controller: {}\nAction: {}\nEvent Type: {event_type}",
        context.controller, context.action
    ));
    entries.extend(
        context
            .parameters
            .iter()
            .map(|(name, value)| format!("|--- {name} = {value}")),
    );
    entries.push(SEPARATOR.to_string());
    entries
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use panel_common::LogLevel;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use uuid::Uuid;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("panel_common_web_{}", Uuid::new_v4()))
    }

    fn quiet(root: &Path) -> LoggerSettings {
        LoggerSettings {
            console: false,
            ..LoggerSettings::default().with_base_dir(root)
        }
    }

    #[test]
    fn test_defaults() {
        let filter = RequestActionLog::default();
        assert_eq!(filter.log_name(), "Panel.Common");
        assert!(!filter.is_debug());
    }

    #[test]
    fn test_banner_widths_match() {
        assert_eq!(REQUEST_RECEIVED.len(), SEPARATOR.len());
    }

    #[test]
    fn test_render_block() {
        // Arrange
        let context = ActionContext::new("Motd", "Save")
            .with_parameter("id", 4)
            .with_parameter("message", "hello");

        // Act
        let entries = render("OnActionExecuting", &context);

        // Assert
        assert_eq!(
            entries,
            vec![
                REQUEST_RECEIVED.to_string(),
                "Controller: Motd\nAction: Save\nEvent Type: OnActionExecuting".to_string(),
                "|--- id = 4".to_string(),
                "|--- message = hello".to_string(),
                SEPARATOR.to_string(),
            ]
        );
    }

    #[test]
    fn test_non_debug_filter_writes_nothing() {
        // Arrange
        let root = temp_root();
        let filter = RequestActionLog::new("Web", false).with_settings(quiet(&root));

        // Act
        let entries = filter.on_action_executing(&ActionContext::new("Motd", "Index"));

        // Assert: rendered, but no channel was ever opened
        assert_eq!(entries.len(), 3);
        assert!(filter.channel.get().is_none());
        assert!(!root.exists());
    }

    #[test]
    fn test_debug_filter_writes_each_entry_at_debug() {
        // Arrange
        let root = temp_root();
        let bus = Arc::new(LogEventBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = Arc::clone(&seen);
            bus.subscribe_records(move |rec| {
                seen.lock().expect("lock poisoned").push((
                    rec.level,
                    rec.application.to_string(),
                    rec.message.to_string(),
                ));
            });
        }
        let filter = RequestActionLog::new("Web", true)
            .with_settings(quiet(&root))
            .with_event_bus(bus);
        let context = ActionContext::new("Motd", "Save").with_parameter("id", 4);

        // Act
        let entries = filter.on_action_executing(&context);

        // Assert
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), entries.len());
        for ((level, application, message), entry) in seen.iter().zip(&entries) {
            assert_eq!(*level, LogLevel::Debug);
            assert_eq!(application, "Web");
            assert_eq!(message, entry);
        }
        assert_eq!(
            filter.channel.get().map(|c| c.log_path().to_path_buf()),
            Some(root.join("Components/Misc/Logs/Web/Web.log"))
        );

        std::fs::remove_dir_all(&root).ok();
    }
}
