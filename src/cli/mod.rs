use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use xpick::config::SessionConfig;

mod demo;
mod picks;

/// xpick - Interactive picking engine for DAS records
#[derive(Parser)]
#[command(name = "xpick")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Startup settings shared by every command; flags override the file
#[derive(Args, Debug, Clone, Default)]
pub struct StartupArgs {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Comma-separated phase labels (e.g. "P,S")
    #[arg(long)]
    phases: Option<String>,

    /// Comma-separated phase colors, one per label (e.g. "#7F0DFF,#FF00FF")
    #[arg(long)]
    colors: Option<String>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,
}

impl StartupArgs {
    /// Configuration file (if any) with command-line overrides applied
    pub fn load(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SessionConfig::default(),
        };
        config.override_phases(self.phases.as_deref(), self.colors.as_deref());
        config.override_image(self.width, self.height);
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<SessionConfig> {
    SessionConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration {}", path.display()))
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline over a synthetic DAS collection
    Demo {
        #[command(flatten)]
        startup: StartupArgs,

        #[command(flatten)]
        pipeline: demo::PipelineArgs,

        /// Place picks along the modeled arrivals and save them to this file
        #[arg(long, value_name = "FILE")]
        picks_out: Option<PathBuf>,

        /// Print the image summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect a pick file
    Picks {
        /// Pick CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        startup: StartupArgs,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Demo {
            startup,
            pipeline,
            picks_out,
            json,
        } => demo::run(startup.load()?, pipeline, picks_out, json),
        Commands::Picks { file, startup } => picks::run(file, startup.load()?),
    }
}
