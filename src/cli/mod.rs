pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "shipbot")]
#[command(version)]
#[command(about = "Deploy the bot binary to production")]
#[command(
    long_about = "Upload the freshly built bot binary over SSH, move it into place,\nrestart the service, and announce the new version in the channel."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize shipbot configuration
    Init,

    /// Deploy the bot to production
    Deploy {
        /// Target host (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,
    },

    /// Execute a command on the production host
    Exec {
        /// Command to execute
        command: String,

        /// Target host (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Init => commands::init::execute().await,
            Commands::Deploy { host } => {
                let config = AppConfig::load()?;
                commands::deploy::execute(&config, host).await
            }
            Commands::Exec { command, host } => {
                let config = AppConfig::load()?;
                commands::exec::execute(&config, host, &command).await
            }
        }
    }
}
