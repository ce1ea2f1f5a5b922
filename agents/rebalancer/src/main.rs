//! The rebalancer turns transfers received by a Hyperlane multisig into the
//! warp route transfers that forward them, and checks a multisig transaction
//! against those routes before it is signed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::Result;

use crate::{
    cmd::{DomainsCmd, ExecuteCmd, GenerateCmd, InitConfigCmd, ParseCmd, VerifyCmd},
    settings::Settings,
    trace::Level,
};

mod cmd;
mod settings;
mod trace;

#[derive(Parser, Debug)]
#[command(
    name = "celestia-rebalancer",
    version,
    about = "CLI tool for managing Hyperlane multisig rebalancing on Celestia",
    long_about = "celestia-rebalancer helps automate the Hyperlane rebalancing process by:
  1. Parsing incoming transactions to extract routing information
  2. Generating multisig transactions for Hyperlane MsgRemoteTransfer
  3. Verifying that transactions match the intended routes"
)]
struct Cli {
    #[command(subcommand)]
    cmd: RebalancerCmd,
    /// JSON settings file, overlaid by REBALANCER_* environment variables
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Log level, overrides the settings
    #[arg(long, global = true, value_enum)]
    log_level: Option<Level>,
}

#[derive(Subcommand, Debug)]
enum RebalancerCmd {
    /// Parse incoming transfers and extract Hyperlane routing information
    Parse(ParseCmd),
    /// Generate unsigned multisig transfers from routes
    Generate(GenerateCmd),
    /// Verify that a transaction matches the intended routes
    Verify(VerifyCmd),
    /// Write an example whitelist config
    InitConfig(InitConfigCmd),
    /// List known destination domains
    Domains(DomainsCmd),
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", "Failed".red().underline());
            eprintln!("{}", format!("Error: {err:?}").red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut settings = Settings::load(cli.settings.as_deref())?;
    if let Some(level) = cli.log_level {
        settings.log.level = level;
    }
    settings.log.start_tracing()?;

    match cli.cmd {
        RebalancerCmd::Parse(cmd) => cmd.execute(&settings).await,
        RebalancerCmd::Generate(cmd) => cmd.execute(&settings).await,
        RebalancerCmd::Verify(cmd) => cmd.execute(&settings).await,
        RebalancerCmd::InitConfig(cmd) => cmd.execute(&settings).await,
        RebalancerCmd::Domains(cmd) => cmd.execute(&settings).await,
    }
}
