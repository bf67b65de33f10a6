use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use fingerbox::{
    generate, init_logging, serve, AppState, BoxSpec, Config, LogFormat, OutputFormat,
    BUILD_DATE, VERSION,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "fingerbox", version, about = "Finger-jointed box generator for laser cutters")]
struct Cli {
    /// Log output style
    #[arg(long, value_enum, default_value_t = LogStyle::Pretty, global = true)]
    log_format: LogStyle,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogStyle {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Gcode,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Svg => OutputFormat::Svg,
            Format::Gcode => OutputFormat::Gcode,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Configuration file (.toml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Listen address, overrides the configuration
        #[arg(long)]
        bind: Option<String>,
        /// Artifact directory, overrides the configuration
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Generate one box and write its cut file
    Generate {
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        depth: f64,
        /// Material thickness in mm (3, 4 or 6)
        #[arg(long)]
        thickness: f64,
        #[arg(long, value_enum, default_value_t = Format::Svg)]
        format: Format,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        /// Configuration file (.toml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(match cli.log_format {
        LogStyle::Pretty => LogFormat::Pretty,
        LogStyle::Json => LogFormat::Json,
    })?;
    info!(version = VERSION, build_date = BUILD_DATE, "fingerbox starting");

    match cli.command {
        Command::Serve {
            config,
            bind,
            output_dir,
        } => {
            let mut config = Config::load_or_default(config.as_deref())?;
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(dir) = output_dir {
                config.server.output_dir = dir;
            }
            config.validate()?;

            let addr = config.server.bind_addr()?;
            serve(
                addr,
                AppState::from_config(&config),
                config.server.request_timeout(),
            )
            .await
            .with_context(|| format!("server on {addr} failed"))?;
        }
        Command::Generate {
            width,
            height,
            depth,
            thickness,
            format,
            out,
            config,
        } => {
            let config = Config::load_or_default(config.as_deref())?;
            let spec = BoxSpec::new(width, height, depth, thickness);
            let generated = generate(&spec, false, &config.generator_settings())?;
            for joint in generated.butt_joints() {
                warn!(
                    panel = %joint.panel,
                    side = %joint.side,
                    length = joint.length,
                    "butt joint"
                );
            }

            let document = generated.render(format.into(), &config.laser_settings());
            match out {
                Some(path) => {
                    std::fs::write(&path, document)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), id = %generated.id(), "wrote cut file");
                }
                None => print!("{document}"),
            }
        }
    }

    Ok(())
}
