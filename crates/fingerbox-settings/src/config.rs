//! Configuration file model
//!
//! A configuration file is TOML or JSON, chosen by extension. Every section
//! and field is optional; anything missing takes its default.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use fingerbox_joinery::{GeneratorSettings, LaserSettings, LayoutSettings};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const APP_DIR: &str = "fingerbox";
const CONFIG_FILE: &str = "config.toml";

/// Geometry and layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Kerf compensation in mm (0 disables it)
    pub kerf: f64,
    /// Gap between panels on the sheet in mm
    pub panel_spacing: f64,
    /// Usable sheet width in mm
    pub sheet_width: f64,
    /// Usable sheet height in mm
    pub sheet_height: f64,
    /// Place taller panels first
    pub sort_by_height: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            kerf: 0.0,
            panel_spacing: 5.0,
            sheet_width: 1000.0,
            sheet_height: 600.0,
            sort_by_height: true,
        }
    }
}

/// G-code export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserConfig {
    pub passes: u32,
    pub power: u32,
    /// mm/min
    pub feed_rate: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for LaserConfig {
    fn default() -> Self {
        let laser = LaserSettings::default();
        Self {
            passes: laser.passes,
            power: laser.power,
            feed_rate: laser.feed_rate,
            offset_x: laser.offset_x,
            offset_y: laser.offset_y,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, `host:port`
    pub bind: String,
    /// Directory generated artifacts are written to and served from
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            output_dir: PathBuf::from("output"),
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(self.bind.clone()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub laser: LaserConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

fn format_of(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config location: `<config dir>/fingerbox/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::LoadError {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = format_of(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        let save_error = |source| SettingsError::SaveError {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(save_error)?;
        }
        std::fs::write(path, content).map_err(save_error)?;

        debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Load `path` if given, else the default location if that file exists,
    /// else the built-in defaults.
    ///
    /// An explicitly given file must exist.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => {
                debug!("no configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generator = &self.generator;
        if !generator.kerf.is_finite() || generator.kerf < 0.0 || generator.kerf >= 1.0 {
            return Err(ConfigError::out_of_range(
                "generator.kerf",
                generator.kerf,
                "must be at least 0 and below 1mm",
            ));
        }
        if !generator.panel_spacing.is_finite() || generator.panel_spacing < 0.0 {
            return Err(ConfigError::out_of_range(
                "generator.panel_spacing",
                generator.panel_spacing,
                "must not be negative",
            ));
        }
        if !generator.sheet_width.is_finite() || generator.sheet_width <= 0.0 {
            return Err(ConfigError::out_of_range(
                "generator.sheet_width",
                generator.sheet_width,
                "must be > 0",
            ));
        }
        if !generator.sheet_height.is_finite() || generator.sheet_height <= 0.0 {
            return Err(ConfigError::out_of_range(
                "generator.sheet_height",
                generator.sheet_height,
                "must be > 0",
            ));
        }

        if self.laser.passes == 0 {
            return Err(ConfigError::out_of_range(
                "laser.passes",
                self.laser.passes,
                "must be >= 1",
            ));
        }
        if !self.laser.feed_rate.is_finite() || self.laser.feed_rate <= 0.0 {
            return Err(ConfigError::out_of_range(
                "laser.feed_rate",
                self.laser.feed_rate,
                "must be > 0",
            ));
        }

        self.server.bind_addr()?;
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::out_of_range(
                "server.request_timeout_secs",
                self.server.request_timeout_secs,
                "must be > 0",
            ));
        }

        Ok(())
    }

    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            kerf: self.generator.kerf,
            layout: LayoutSettings {
                spacing: self.generator.panel_spacing,
                sheet_width: self.generator.sheet_width,
                sheet_height: self.generator.sheet_height,
                sort_by_height: self.generator.sort_by_height,
            },
        }
    }

    pub fn laser_settings(&self) -> LaserSettings {
        LaserSettings {
            passes: self.laser.passes,
            power: self.laser.power,
            feed_rate: self.laser.feed_rate,
            offset_x: self.laser.offset_x,
            offset_y: self.laser.offset_y,
        }
    }
}
