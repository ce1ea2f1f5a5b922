use std::{path::PathBuf, process::ExitCode};

use async_trait::async_trait;
use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use rebalancer_core::{MessageGenerator, RouteSet};
use rebalancer_cosmos::{UnsignedTx, UnsignedTxOptions, DEFAULT_GAS_LIMIT};
use tracing::warn;

use super::{is_stdout, read_json, write_artifact, ExecuteCmd};
use crate::settings::Settings;

/// Shape of the generated file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain list of outbound messages
    #[default]
    Messages,
    /// Cosmos SDK unsigned transaction, as written by `--generate-only`
    UnsignedTx,
}

/// Generate the unsigned multisig transfers for a routes file
#[derive(Args, Debug)]
#[command(
    long_about = "Generate unsigned Hyperlane MsgRemoteTransfer messages from parsed routes."
)]
pub struct GenerateCmd {
    /// Multisig address (sender)
    #[arg(long)]
    multisig_address: String,
    /// Input routes file
    #[arg(long, default_value = "routes.json")]
    routes: PathBuf,
    /// Output file for the unsigned transaction, `-` for stdout
    #[arg(long, short, default_value = "unsigned-tx.json")]
    output: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Messages)]
    format: OutputFormat,
    /// Gas limit of the unsigned transaction
    #[arg(long, default_value_t = DEFAULT_GAS_LIMIT)]
    gas_limit: u64,
    /// Memo of the unsigned transaction
    #[arg(long, default_value = "")]
    memo: String,
}

#[async_trait]
impl ExecuteCmd for GenerateCmd {
    async fn execute(self, settings: &Settings) -> Result<ExitCode> {
        eprintln!("Generating transactions from {}...", self.routes.display());
        let route_set: RouteSet = read_json(&self.routes)?;
        if route_set.multisig_address != self.multisig_address {
            warn!(
                routes_multisig = %route_set.multisig_address,
                multisig = %self.multisig_address,
                "Routes were extracted for a different multisig"
            );
        }

        let messages = MessageGenerator::new(&self.multisig_address)
            .generate(&route_set)
            .context("Failed to generate transactions")?;
        eprintln!("Generated {} MsgRemoteTransfer messages", messages.len());

        match self.format {
            OutputFormat::Messages => write_artifact(&self.output, &messages)?,
            OutputFormat::UnsignedTx => {
                let options =
                    UnsignedTxOptions::new(self.memo, self.gas_limit, settings.denom.clone());
                let tx = UnsignedTx::from_messages(&messages, &options)?;
                write_artifact(&self.output, &tx)?
            }
        }
        if !is_stdout(&self.output) {
            eprintln!("Messages saved to {}", self.output.display());
        }

        eprintln!("\nNext steps:");
        eprintln!("1. Review the generated messages");
        eprintln!("2. Use 'celestia-rebalancer verify' to validate");
        eprintln!("3. Create multisig transaction using celestia-appd or Keplr");
        Ok(ExitCode::SUCCESS)
    }
}
