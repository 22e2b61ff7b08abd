//! # panel-common
//!
//! Shared utilities for plugins hosted inside a game-server control panel.
//!
//! The crate bundles two independent components:
//!
//! - **`configuration`** – A typed JSON-file store.  Each configuration value
//!   of type `T` lives at a deterministic path derived from the crate and
//!   module that declare `T`:
//!   `./Components/{crate}/Configurations/{module}/{Name}.json`.  Missing
//!   files are generated from `T::default()`; unreadable files fall back to
//!   the default without touching the disk.
//!
//! - **`logging`** – A per-component logger.  Every [`LogChannel`] writes to
//!   the console and to a daily-rolled file under
//!   `./Components/{crate}/Logs/{module}/{App}/{App}.log`, then fans the
//!   record out to the subscribers registered on a [`LogEventBus`].
//!
//! Both components identify the carrier type through a [`TypeDescriptor`]
//! rather than runtime reflection.  The [`component!`] macro derives one from
//! the call site:
//!
//! ```rust
//! use panel_common::{component, Component};
//!
//! #[derive(Default)]
//! pub struct ServerSettings {
//!     pub motd: String,
//! }
//! component!(ServerSettings);
//!
//! let descriptor = ServerSettings::descriptor();
//! assert_eq!(descriptor.short_name(), "ServerSettings");
//! ```

pub mod configuration;
pub mod domain;
pub mod logging;

pub use configuration::{ConfigurationBuilder, ConfigurationProvider, LocalConfiguration};
pub use domain::descriptor::{Component, TypeDescriptor};
pub use domain::level::{LogLevel, ParseLogLevelError};
pub use logging::bus::{ExceptionRecord, LogEventBus, LogRecord, SubscriptionId};
pub use logging::channel::{LogChannel, LogChannelBuilder};
pub use logging::files::LogFile;
pub use logging::settings::{LoggerSettings, LOG_PATH_ENV};
pub use logging::LogError;
