//! CLI module for AirVoice
//!
//! Provides commands:
//! - `serve`: run the skill HTTP server
//! - `devices`: list the devices and readings behind a token

use clap::{Parser, Subcommand};

pub mod devices;

/// AirVoice CLI
#[derive(Parser, Debug)]
#[command(name = "airvoice")]
#[command(about = "Voice assistant skill for AirGradient air-quality monitors")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server
    Serve,
    /// List the devices on an AirGradient account
    Devices {
        /// AirGradient API token
        #[arg(long)]
        token: String,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve) => crate::server::run().await,
        Some(Commands::Devices { token }) => devices::run(&token).await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
