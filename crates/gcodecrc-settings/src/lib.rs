//! gcodecrc Settings Crate
//!
//! Handles configuration file loading, validation and persistence.

pub mod config;
pub mod error;

pub use config::{Config, LoggingSettings, NumberingSettings};
pub use error::{SettingsError, SettingsResult};
