//! Fingerbox Settings Crate
//!
//! Loads, validates and saves the application configuration and converts it
//! into generator and laser settings.

pub mod config;
pub mod error;

pub use config::{Config, GeneratorConfig, LaserConfig, ServerConfig};
pub use error::{ConfigError, SettingsError, SettingsResult};
