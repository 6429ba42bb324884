//! # Configuration State
//!
//! Bridge configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CELIDONE_*`)
//! 2. Config file (`celidone.toml`, or the path in `CELIDONE_CONFIG`)
//! 3. Defaults (this file)
//!
//! ## Example File
//! ```toml
//! [validation]
//! name_min_len = 3
//!
//! [rental]
//! late_fee_bps = 300         # 3% of the total per overdue day
//! late_fee_grace_days = 0
//! late_fee_cap = 500.0       # reais
//!
//! [logging]
//! filter = "info,celidone=trace"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use celidone_core::{RentalPolicy, ValidationRules};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Filter used when neither the file nor the environment sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,celidone=debug";

/// Environment variable holding an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "CELIDONE_CONFIG";

const CONFIG_FILE_NAME: &str = "celidone.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Name length bounds for the customer form
    pub validation: ValidationRules,

    /// Amount ceilings, late fee and suggestion rates
    pub rental: RentalPolicy,

    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` still wins when set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Something that happened while loading, logged once tracing is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadNote {
    FromFile(PathBuf),
    FileNotFound(PathBuf),
    IgnoredOverride { key: &'static str, value: String },
}

impl LoadNote {
    pub fn log(&self) {
        match self {
            LoadNote::FromFile(path) => info!(?path, "Loaded config from file"),
            LoadNote::FileNotFound(path) => debug!(?path, "Config file not found, using defaults"),
            LoadNote::IgnoredOverride { key, value } => {
                warn!(key, value = %value, "Ignoring unparseable override")
            }
        }
    }
}

/// A configuration plus the notes gathered while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: BridgeConfig,
    pub notes: Vec<LoadNote>,
}

impl BridgeConfig {
    /// Loads configuration from file and environment.
    ///
    /// Without an explicit path the platform config dir is tried; a missing
    /// file is not an error. Nothing is logged here since this runs before
    /// the subscriber exists; see [`BridgeConfig::or_default`].
    pub fn load(config_path: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
        let mut config = Self::default();
        let mut notes = Vec::new();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                config = Self::from_file(&path)?;
                notes.push(LoadNote::FromFile(path));
            } else {
                notes.push(LoadNote::FileNotFound(path));
            }
        }

        notes.extend(config.apply_env_overrides());
        config.validate()?;

        Ok(LoadedConfig { config, notes })
    }

    /// Logs the load notes and unwraps the result, falling back to defaults
    /// with a warning.
    pub fn or_default(loaded: Result<LoadedConfig, ConfigError>) -> Self {
        match loaded {
            Ok(LoadedConfig { config, notes }) => {
                notes.iter().for_each(LoadNote::log);
                config
            }
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Path given through `CELIDONE_CONFIG`, if any.
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `CELIDONE_*` environment variables.
    pub fn apply_env_overrides(&mut self) -> Vec<LoadNote> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup.
    ///
    /// Unparseable values are skipped and returned as notes.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<LoadNote> {
        let mut notes = Vec::new();

        if let Some(value) = parsed(&lookup, "CELIDONE_NAME_MIN_LENGTH", &mut notes) {
            self.validation.name_min_len = value;
        }
        if let Some(value) = parsed(&lookup, "CELIDONE_NAME_MAX_LENGTH", &mut notes) {
            self.validation.name_max_len = value;
        }
        if let Some(value) = parsed(&lookup, "CELIDONE_LATE_FEE_BPS", &mut notes) {
            self.rental.late_fee_bps = value;
        }
        if let Some(value) = parsed(&lookup, "CELIDONE_LATE_FEE_GRACE_DAYS", &mut notes) {
            self.rental.late_fee_grace_days = value;
        }
        if let Some(filter) = lookup("CELIDONE_LOG_FILTER") {
            self.logging.filter = filter;
        }

        notes
    }

    /// Rejects settings the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.validation;
        if rules.name_min_len == 0 || rules.name_min_len > rules.name_max_len {
            return Err(ConfigError::Invalid(format!(
                "name length bounds {}..={} are empty",
                rules.name_min_len, rules.name_max_len
            )));
        }

        let policy = &self.rental;
        if !policy.max_valor_aluguel.is_positive() || !policy.max_valor_caucao.is_positive() {
            return Err(ConfigError::Invalid(
                "amount ceilings must be positive".to_string(),
            ));
        }
        if policy.late_fee_grace_days < 0 {
            return Err(ConfigError::Invalid(
                "late_fee_grace_days cannot be negative".to_string(),
            ));
        }
        if policy.late_fee_cap.is_negative() || policy.deposit_floor.is_negative() {
            return Err(ConfigError::Invalid(
                "late_fee_cap and deposit_floor cannot be negative".to_string(),
            ));
        }
        if policy.deposit_min_bps > policy.deposit_max_bps {
            return Err(ConfigError::Invalid(format!(
                "deposit range {}..{} bps is inverted",
                policy.deposit_min_bps, policy.deposit_max_bps
            )));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging filter is empty".to_string()));
        }

        Ok(())
    }

    /// `celidone.toml` in the platform config directory.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("br", "celidone", "celidone")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    notes: &mut Vec<LoadNote>,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            notes.push(LoadNote::IgnoredOverride { key, value: raw });
            None
        }
    }
}
