//! Deterministic on-disk layout under `{root}/Components/`.
//!
//! ```text
//! {root}/Components/{A}/Configurations/{N}/{Name}.json
//! {root}/Components/{A}/Logs/{N}/{App}/{App}.log
//! {root}/Components/Misc/Logs/{App}/{App}.log          (no carrier type)
//! ```
//!
//! `A` is the carrier's assembly and `N` its
//! [trimmed namespace](TypeDescriptor::trimmed_namespace).  All functions are
//! pure: no directories are created here.

use std::path::{Path, PathBuf};

use super::descriptor::TypeDescriptor;

pub const COMPONENTS_DIR: &str = "Components";
pub const CONFIGURATIONS_DIR: &str = "Configurations";
pub const LOGS_DIR: &str = "Logs";
/// Assembly directory used by channels that have no carrier type.
pub const MISC_DIR: &str = "Misc";

const JSON_EXTENSION: &str = ".json";

/// Appends `.json` to `name` unless it already ends with it.
pub fn normalize_config_name(name: &str) -> String {
    if name.ends_with(JSON_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{JSON_EXTENSION}")
    }
}

/// `{root}/Components/{A}/Configurations/{N}/{name}.json`
pub fn configuration_path(root: &Path, carrier: &TypeDescriptor, config_name: &str) -> PathBuf {
    root.join(COMPONENTS_DIR)
        .join(carrier.assembly())
        .join(CONFIGURATIONS_DIR)
        .join(carrier.trimmed_namespace())
        .join(normalize_config_name(config_name))
}

/// Log file path for a channel, with or without a carrier type.
pub fn log_path(root: &Path, carrier: Option<&TypeDescriptor>, application: &str) -> PathBuf {
    let base = root.join(COMPONENTS_DIR);
    let directory = match carrier {
        Some(carrier) => base
            .join(carrier.assembly())
            .join(LOGS_DIR)
            .join(carrier.trimmed_namespace())
            .join(application),
        None => base.join(MISC_DIR).join(LOGS_DIR).join(application),
    };
    directory.join(format!("{application}.log"))
}

/// Root that replaces the leading `./` when a host log path is configured:
/// the sibling of the override's parent, i.e. `{override}/..`.
pub fn overridden_root(log_path_override: &Path) -> PathBuf {
    log_path_override.join("..")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
