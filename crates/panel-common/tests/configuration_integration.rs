//! Integration tests for the configuration store.
//!
//! These tests exercise the public API end-to-end against a temporary
//! directory: path derivation from `component!`, auto-generation, explicit
//! saves, corrupt-file fallback, and storing `LoggerSettings` itself.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use panel_common::{
    ConfigurationProvider, LocalConfiguration, LogChannel, LogEventBus, LogLevel, LoggerSettings,
};
use uuid::Uuid;

mod motd {
    use panel_common::component;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct MotdSettings {
        pub name: String,
        pub count: i32,
    }
    component!(MotdSettings);
}

use motd::MotdSettings;

fn temp_root() -> PathBuf {
    std::env::temp_dir().join(format!("panel_common_it_config_{}", Uuid::new_v4()))
}

fn quiet(root: &Path) -> LoggerSettings {
    LoggerSettings {
        console: false,
        ..LoggerSettings::default().with_base_dir(root)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_backing_path_uses_declaring_crate_and_module() {
    let root = temp_root();
    let store = LocalConfiguration::<MotdSettings>::builder()
        .name("S")
        .base_dir(&root)
        .logger_settings(quiet(&root))
        .build();

    assert_eq!(
        store.path(),
        root.join("Components/configuration_integration/Configurations/motd/S.json")
    );

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn test_generate_save_corrupt_lifecycle() {
    // Arrange
    let root = temp_root();
    let bus = Arc::new(LogEventBus::new());
    let exceptions = Arc::new(Mutex::new(0usize));
    {
        let exceptions = Arc::clone(&exceptions);
        bus.subscribe_exceptions(move |_| *exceptions.lock().expect("lock poisoned") += 1);
    }
    let logger = LogChannel::builder("LocalConfiguration")
        .settings(quiet(&root))
        .event_bus(bus)
        .try_build()
        .expect("channel");
    let store = LocalConfiguration::<MotdSettings>::builder()
        .name("S")
        .base_dir(&root)
        .logger(logger)
        .build();

    // Act 1: first read generates the file
    let generated = store.get_configuration();

    // Assert 1
    assert_eq!(generated, MotdSettings::default());
    assert!(store.path().is_file());

    // Act 2: explicit save
    let wanted = MotdSettings {
        name: "hello".to_string(),
        count: 7,
    };
    assert!(store.set_configuration(&wanted));

    // Assert 2
    assert_eq!(store.get_configuration(), wanted);

    // Act 3: corrupt the file
    std::fs::write(store.path(), "not-json").unwrap();
    let fallback = store.get_configuration();

    // Assert 3
    assert_eq!(fallback, MotdSettings::default());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "not-json");
    assert_eq!(*exceptions.lock().unwrap(), 1);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn test_store_logs_through_its_own_channel_under_base_dir() {
    // Arrange
    let root = temp_root();
    let store = LocalConfiguration::<MotdSettings>::builder()
        .base_dir(&root)
        .logger_settings(quiet(&root))
        .build();

    // Act
    store.get_configuration();

    // Assert: the store's channel writes inside the same root
    let log_dir = store.logger().log_directory().to_path_buf();
    assert_eq!(
        log_dir,
        root.join("Components/panel_common/Logs/configuration/LocalConfiguration")
    );
    let current = store
        .logger()
        .current_log_file()
        .expect("list")
        .expect("log file");
    let contents = std::fs::read_to_string(current.path).unwrap();
    assert!(contents.contains("Generating default config"), "got: {contents}");
    assert!(contents.contains("Saved new Configuration: MotdSettings.json"), "got: {contents}");

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn test_logger_settings_can_be_persisted_as_configuration() {
    // Arrange
    let root = temp_root();
    let store = LocalConfiguration::<LoggerSettings>::builder()
        .base_dir(&root)
        .logger_settings(quiet(&root))
        .build();
    let wanted = LoggerSettings::default().with_minimum_level(LogLevel::Warning);

    // Act
    assert!(store.set_configuration(&wanted));
    let loaded = store.get_configuration();

    // Assert
    assert_eq!(loaded.minimum_level, LogLevel::Warning);
    assert_eq!(
        store.path(),
        root.join("Components/panel_common/Configurations/logging.settings/LoggerSettings.json")
    );

    std::fs::remove_dir_all(&root).ok();
}
