//! # State Module
//!
//! Everything a command needs, built once at startup.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      serve() loop                               │   │
//! │  │  commands::dispatch(&state, command)                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │ BridgeConfig │  │ValidationService │  │ RentalRuleEngine │          │
//! │  │              │  │                  │  │                  │          │
//! │  │ [validation] │  │  name bounds     │  │  RentalPolicy    │          │
//! │  │ [rental]     │  │  cliente/produto │  │  late fee        │          │
//! │  │ [logging]    │  │  forms           │  │  suggestions     │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Everything is read-only after startup; shared by reference          │
//! │  • The clock is read per request, never stored                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::{
    BridgeConfig, ConfigError, LoadNote, LoadedConfig, LoggingConfig, CONFIG_PATH_ENV,
    DEFAULT_LOG_FILTER,
};

use chrono::NaiveDate;
use celidone_core::{RentalRuleEngine, ValidationService};

/// Services and configuration shared by every command.
#[derive(Debug, Clone)]
pub struct EngineState {
    pub config: BridgeConfig,
    pub validation: ValidationService,
    pub rentals: RentalRuleEngine,
}

impl EngineState {
    /// Builds the services from `config`.
    pub fn new(config: BridgeConfig) -> Self {
        EngineState {
            validation: ValidationService::new(config.validation.clone()),
            rentals: RentalRuleEngine::new(config.rental.clone()),
            config,
        }
    }

    /// Local calendar date, used when a request does not name one.
    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

impl Default for EngineState {
    fn default() -> Self {
        EngineState::new(BridgeConfig::default())
    }
}
