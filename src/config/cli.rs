use crate::config::toml_config::QuoteConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "renovation-quote")]
#[command(about = "Quote configuration and estimation for painting and renovation work")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a filled-in form and show which steps it would pass
    Estimate {
        /// JSON file holding a form state
        #[arg(long)]
        form: PathBuf,

        /// TOML configuration with pricing overrides
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Replay form actions and navigation commands through a session
    Replay {
        /// JSON array of actions and {"nav": "next" | "back"} commands
        #[arg(long)]
        script: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Store the lead here instead of the `[leads]` destination
        #[arg(long)]
        submit_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl Command {
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Estimate { config, .. } | Command::Replay { config, .. } => config.as_ref(),
        }
    }
}

impl CliConfig {
    /// Loads and validates the configuration file, or the built-in defaults.
    pub fn load_quote_config(&self) -> Result<QuoteConfig> {
        let config = match self.command.config_path() {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                QuoteConfig::from_file(path)?
            }
            None => QuoteConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}
