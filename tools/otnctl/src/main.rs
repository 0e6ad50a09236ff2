//! otnctl - OTN chassis inspection tool
//!
//! Prints chassis and line card state and alarm reports read from the chassis
//! databases.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use errors::OtnError;
use otnctl::{CliContext, ShowCommands};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "otnctl")]
#[command(about = "OTN chassis inspection tool")]
#[command(long_about = "OTN chassis inspection tool

Examples:
  otnctl show chassis info              # Chassis identity and software version
  otnctl show chassis alarm current     # Active system alarms
  otnctl show slot 3 alarm history      # Cleared alarms and events of slot 3
  otnctl show slot 3 info               # Line card state of slot 3")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file overriding /etc/otnctl/otnctl.yaml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show chassis, slot and alarm state
    Show {
        #[command(subcommand)]
        command: ShowCommands,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Logs go to stderr; stdout carries the reports
    let log_level = if cli.verbose { "debug" } else { "warn" };
    if let Err(e) = common::logging::init_cli_logging(log_level, !cli.no_color) {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(exit_code(&e));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = common::load_config(cli.config.as_deref())?;
    debug!("Configuration: {:?}", config);
    let ctx = CliContext::from_config(config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Show { command } => otnctl::show::handle_command(command, &ctx, &mut out).await,
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    match error.chain().find_map(|cause| cause.downcast_ref::<OtnError>()) {
        Some(otn) => {
            debug!("Exiting on {}", otn.error_code());
            otn.exit_code()
        },
        None => 1,
    }
}
