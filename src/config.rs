//! Application configuration management.
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. TOML file: `--config <PATH>`, or `config.toml` in the platform config
//!    directory when present
//! 3. Environment variables prefixed with `AUDIODEDUPE_`
//!    (e.g. `AUDIODEDUPE_CHUNK_SIZE=65536`)
//! 4. Command-line flags ([`Config::merge_cli`])
//!
//! # Example file
//!
//! ```toml
//! extensions = ["mp3", "flac", "opus"]
//! chunk_size = 65536
//! action = "csv"
//! csv_file = "dupes.csv"
//! sort_by_name = true
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::{Action, Cli};
use crate::scanner::{
    normalize_extension, ScannerConfig, DEFAULT_AUDIO_EXTENSIONS, DEFAULT_CHUNK_SIZE,
};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "AUDIODEDUPE_";

/// Default report file name.
pub const DEFAULT_CSV_FILE: &str = "duplicates.csv";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// A source could not be parsed or had the wrong shape.
    #[error("invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// `chunk_size` was zero.
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,

    /// No usable extension was configured.
    #[error("at least one audio extension must be configured")]
    NoExtensions,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Eligible audio extensions (case-insensitive, leading dot optional).
    pub extensions: Vec<String>,
    /// Read chunk size for hashing, in bytes.
    pub chunk_size: usize,
    /// What to do with duplicates.
    pub action: Action,
    /// Report path for the CSV action.
    pub csv_file: PathBuf,
    /// Sort candidates by file name before grouping.
    pub sort_by_name: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_AUDIO_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            action: Action::Csv,
            csv_file: PathBuf::from(DEFAULT_CSV_FILE),
            sort_by_name: false,
        }
    }
}

impl Config {
    /// Load configuration from defaults, a TOML file and the environment.
    ///
    /// With `explicit` set, that file must exist. Otherwise the default
    /// platform path is used if it exists and skipped if it does not.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit file is missing, a source is
    /// malformed, or the merged values fail validation.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path(),
        };

        if let Some(ref path) = path {
            log::debug!("Using config file: {}", path.display());
        }

        Self::load_from(path.as_deref())
    }

    /// Merge defaults, an optional TOML file and the environment.
    ///
    /// A missing file is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config: Config = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(action) = cli.action {
            self.action = action;
        }
        if let Some(ref csv_file) = cli.csv_file {
            self.csv_file.clone_from(csv_file);
        }
        if !cli.extensions.is_empty() {
            self.extensions.clone_from(&cli.extensions);
        }
        if cli.sort {
            self.sort_by_name = true;
        }
        self
    }

    /// Check merged values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroChunkSize`] or [`ConfigError::NoExtensions`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self
            .extensions
            .iter()
            .all(|ext| normalize_extension(ext).is_empty())
        {
            return Err(ConfigError::NoExtensions);
        }
        Ok(())
    }

    /// Build the scanner configuration from these settings.
    #[must_use]
    pub fn scanner_config(&self) -> ScannerConfig {
        ScannerConfig::default()
            .with_extensions(&self.extensions)
            .with_chunk_size(self.chunk_size)
            .with_sort_by_name(self.sort_by_name)
    }

    /// Default platform-specific config file, if it exists.
    fn default_path() -> Option<PathBuf> {
        let path = ProjectDirs::from("", "", "audiodedupe")?
            .config_dir()
            .join("config.toml");
        path.exists().then_some(path)
    }
}
