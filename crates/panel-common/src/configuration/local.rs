//! File-backed [`ConfigurationProvider`].

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ConfigError, ConfigurationProvider};
use crate::domain::descriptor::{Component, TypeDescriptor};
use crate::domain::paths;
use crate::logging::channel::LogChannel;
use crate::logging::settings::LoggerSettings;

const UTF8_BOM: char = '\u{feff}';
const GENERATING_DEFAULT: &str = "Generating default config";

type Diagnostics = Box<dyn Write + Send>;

/// A configuration value of type `T` stored as an indented JSON file.
///
/// The backing path is fixed at construction:
/// `{base}/Components/{A}/Configurations/{N}/{config_name}` where `A` and `N`
/// come from `T`'s [`TypeDescriptor`].
pub struct LocalConfiguration<T> {
    config_name: String,
    generate_if_non_existing: bool,
    path: PathBuf,
    logger: LogChannel,
    diagnostics: Mutex<Diagnostics>,
    _carrier: PhantomData<fn() -> T>,
}

impl<T> Component for LocalConfiguration<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new(
            env!("CARGO_CRATE_NAME"),
            concat!(env!("CARGO_CRATE_NAME"), "::configuration"),
            "LocalConfiguration",
        )
    }
}

impl<T> LocalConfiguration<T>
where
    T: Component + Default + Serialize + DeserializeOwned,
{
    /// Store named after `T`'s short name, rooted at the working directory.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Store with an explicit name; `.json` is appended if missing.
    pub fn named(config_name: impl Into<String>) -> Self {
        Self::builder().name(config_name).build()
    }

    pub fn builder() -> ConfigurationBuilder<T> {
        ConfigurationBuilder {
            name: None,
            base_dir: PathBuf::from("."),
            generate_if_non_existing: true,
            logger: None,
            logger_settings: None,
            diagnostics: None,
            _carrier: PhantomData,
        }
    }

    /// File name of the backing document, always ending in `.json`.
    pub fn config_name(&self) -> &str {
        &self.config_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn generate_if_non_existing(&self) -> bool {
        self.generate_if_non_existing
    }

    pub fn set_generate_if_non_existing(&mut self, generate: bool) {
        self.generate_if_non_existing = generate;
    }

    /// The channel failures and saves are reported on.
    pub fn logger(&self) -> &LogChannel {
        &self.logger
    }

    /// Announces the synthesized default on the diagnostics output
    /// regardless of the channel's minimum level, then on the channel.
    fn default_value(&self) -> T {
        {
            let mut out = self
                .diagnostics
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let _ = writeln!(out, "{GENERATING_DEFAULT}");
            let _ = out.flush();
        }
        self.logger.information(GENERATING_DEFAULT);
        T::default()
    }

    fn ensure_parent_dir(&self) -> Result<(), ConfigError> {
        match self.path.parent() {
            Some(dir) => fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            }),
            None => Ok(()),
        }
    }

    /// `Ok(None)` when the backing file does not exist.
    fn read(&self) -> Result<Option<T>, ConfigError> {
        self.ensure_parent_dir()?;

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let json = content.strip_prefix(UTF8_BOM).unwrap_or(&content);
        serde_json::from_str(json)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    fn write(&self, config: &T) -> Result<(), ConfigError> {
        self.ensure_parent_dir()?;
        let content = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl<T> Default for LocalConfiguration<T>
where
    T: Component + Default + Serialize + DeserializeOwned,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ConfigurationProvider<T> for LocalConfiguration<T>
where
    T: Component + Default + Serialize + DeserializeOwned,
{
    fn get_configuration(&self) -> T {
        match self.read() {
            Ok(Some(config)) => config,
            Ok(None) if self.generate_if_non_existing => {
                self.logger.information(&format!(
                    "Config '{}' does not exist. Auto generating.",
                    self.config_name
                ));
                let config = self.default_value();
                self.set_configuration(&config);
                config
            }
            Ok(None) => {
                self.logger.debug(&format!(
                    "Config '{}' does not exist and auto generation is disabled.",
                    self.config_name
                ));
                self.default_value()
            }
            Err(err) => {
                self.logger.log_exception(&err);
                self.default_value()
            }
        }
    }

    fn set_configuration(&self, config: &T) -> bool {
        match self.write(config) {
            Ok(()) => {
                self.logger
                    .information(&format!("Saved new Configuration: {}", self.config_name));
                true
            }
            Err(err) => {
                self.logger.log_exception(&err);
                false
            }
        }
    }
}

/// Builder for [`LocalConfiguration`].
pub struct ConfigurationBuilder<T> {
    name: Option<String>,
    base_dir: PathBuf,
    generate_if_non_existing: bool,
    logger: Option<LogChannel>,
    logger_settings: Option<LoggerSettings>,
    diagnostics: Option<Diagnostics>,
    _carrier: PhantomData<fn() -> T>,
}

impl<T> ConfigurationBuilder<T>
where
    T: Component + Default + Serialize + DeserializeOwned,
{
    /// Logical name; defaults to `T`'s short name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Directory that `Components/` is created under (default `.`).
    pub fn base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn generate_if_non_existing(mut self, generate: bool) -> Self {
        self.generate_if_non_existing = generate;
        self
    }

    /// Reports on `logger` instead of the store's own channel.
    pub fn logger(mut self, logger: LogChannel) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Settings for the store's own channel.  Ignored when a logger is given.
    pub fn logger_settings(mut self, settings: LoggerSettings) -> Self {
        self.logger_settings = Some(settings);
        self
    }

    /// Where the default-generation line goes instead of stdout.
    pub fn diagnostics(mut self, out: impl Write + Send + 'static) -> Self {
        self.diagnostics = Some(Box::new(out));
        self
    }

    pub fn build(self) -> LocalConfiguration<T> {
        let carrier = T::descriptor();
        let config_name =
            paths::normalize_config_name(self.name.as_deref().unwrap_or(carrier.short_name()));
        let path = paths::configuration_path(&self.base_dir, &carrier, &config_name);

        let base_dir = self.base_dir;
        let logger_settings = self.logger_settings;
        let logger = self.logger.unwrap_or_else(|| {
            let owner = LocalConfiguration::<T>::descriptor();
            LogChannel::builder(owner.short_name())
                .carrier(owner)
                .settings(
                    logger_settings
                        .unwrap_or_else(|| LoggerSettings::from_env().with_base_dir(&base_dir)),
                )
                .build()
        });

        LocalConfiguration {
            config_name,
            generate_if_non_existing: self.generate_if_non_existing,
            path,
            logger,
            diagnostics: Mutex::new(
                self.diagnostics
                    .unwrap_or_else(|| Box::new(io::stdout()) as Diagnostics),
            ),
            _carrier: PhantomData,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
