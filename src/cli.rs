use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default property snapshot location
pub const DEFAULT_PROPERTY_FILE: &str = "bom-sync.properties.json";

/// Pass to run over the configured repositories
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Identify artifacts and populate their BOM metadata
    Identify,
    /// Replay BOM change notifications onto identified repositories
    Update,
    /// Run identify, then update
    Run,
    /// Print the inspection status of each repository (no network access)
    Status,
}

impl Command {
    pub fn needs_service(&self) -> bool {
        !matches!(self, Command::Status)
    }
}

/// Synchronize BOM service metadata onto repository artifacts
#[derive(Parser, Debug)]
#[command(name = "bom-sync")]
#[command(version)]
#[command(about = "Synchronize BOM service vulnerability and policy metadata onto repository artifacts", long_about = None)]
pub struct Args {
    /// Path to the config file (defaults to ./bom-sync.config.yml)
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Property snapshot holding the repositories' artifact properties
    #[arg(short = 's', long = "property-file", value_name = "PROPERTY_FILE", default_value = DEFAULT_PROPERTY_FILE)]
    pub property_file: PathBuf,

    /// Restrict the pass to these repositories
    /// Can be specified multiple times: -r npm-local -r pypi-local
    #[arg(short, long = "repository", value_name = "REPO")]
    pub repositories: Vec<String>,

    /// Suppress the progress bar and the summary message on stderr
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
