//! # Fingerbox
//!
//! Parametric finger-jointed box generator. Turns four numbers (width,
//! height, depth, material thickness) into laser-ready cut files for the six
//! panels of a box that assembles without glue.
//!
//! ## Architecture
//!
//! Fingerbox is organized as a workspace with multiple crates:
//!
//! 1. **fingerbox-core** - Units, material gauges, 2D geometry primitives
//! 2. **fingerbox-joinery** - Validation, panel decomposition, joint planning,
//!    outlines, sheet layout, SVG and G-code export
//! 3. **fingerbox-settings** - TOML/JSON configuration
//! 4. **fingerbox-server** - HTTP service used by the browser editor
//! 5. **fingerbox** - Command line binary that integrates all crates

pub use fingerbox_core::{format_mm, Axis, BoundingBox, Gauge, Point};
pub use fingerbox_joinery::{
    generate, BoxSpec, ButtJoint, Generated, GeneratorError, GeneratorSettings, LaserSettings,
    LayoutSettings, OutputFormat, ValidationError,
};
pub use fingerbox_server::{router, serve, AppState, ArtifactStore};
pub use fingerbox_settings::{Config, ConfigError, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Console log output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, multi-line
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support (default level INFO)
/// - Output on stderr, so generated files can be written to stdout
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_thread_names(true)
                .with_line_number(true)
                .pretty();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
