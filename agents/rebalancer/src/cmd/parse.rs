use std::{path::PathBuf, process::ExitCode};

use async_trait::async_trait;
use clap::Args;
use eyre::{Context, Result};
use rebalancer_core::{Diagnostic, Extraction, RouteExtractor, Severity, Whitelist};
use rebalancer_cosmos::{ConnectionConf, CosmosTransactionSource};
use tracing::{info, warn};

use super::{is_stdout, write_artifact, ExecuteCmd};
use crate::settings::Settings;

const PARSE_LONG_ABOUT: &str = r#"Parse transfers sent to the multisig address and extract routing information from their custom_hook_metadata, message fields or transaction memo.

The custom_hook_metadata should be JSON format:
{
  "destination_domain": 1380012617,
  "recipient": "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0",
  "token_id": "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
  "amount": "10000"
}

Optional config file for address whitelisting:
{
  "whitelist": {
    "domains": {
      "2340": ["0x742d35cc6634c0532925a3b844bc9e7595f0beb0"],
      "1": ["0x1234567890123456789012345678901234567890"]
    }
  }
}"#;

/// Extract routes from the transfers a multisig received
#[derive(Args, Debug)]
#[command(long_about = PARSE_LONG_ABOUT)]
pub struct ParseCmd {
    /// Multisig address to filter transactions
    #[arg(long)]
    multisig_address: String,
    /// Starting block height
    #[arg(long)]
    from_height: u64,
    /// Ending block height
    #[arg(long)]
    to_height: u64,
    /// CometBFT RPC endpoint, overrides the settings
    #[arg(long)]
    rpc_url: Option<String>,
    /// Denomination of received transfers, overrides the settings
    #[arg(long)]
    denom: Option<String>,
    /// Optional config file for address whitelisting
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Output file for routes, `-` for stdout
    #[arg(long, short, default_value = "routes.json")]
    output: PathBuf,
}

impl ParseCmd {
    fn extractor(&self, settings: &Settings) -> Result<RouteExtractor> {
        let denom = self.denom.as_deref().unwrap_or(&settings.denom);
        let extractor = RouteExtractor::new(&self.multisig_address).with_denom(denom);

        let Some(path) = &self.config else {
            return Ok(extractor);
        };
        eprintln!("Loading config from {}...", path.display());
        let whitelist = Whitelist::load(path).context("Failed to load config")?;
        eprintln!(
            "✓ Config loaded with {} domains configured ({} whitelisted addresses)",
            whitelist.domain_count(),
            whitelist.address_count()
        );
        Ok(extractor.with_whitelist(whitelist))
    }
}

#[async_trait]
impl ExecuteCmd for ParseCmd {
    async fn execute(self, settings: &Settings) -> Result<ExitCode> {
        let extractor = self.extractor(settings)?;

        let rpc_url = self.rpc_url.as_deref().unwrap_or(&settings.rpc_url);
        let conf = ConnectionConf::new(rpc_url, settings.page_size)?;
        let source =
            CosmosTransactionSource::new(conf).context("Failed to create transaction source")?;

        eprintln!(
            "Parsing transactions to {} from height {} to {}...",
            extractor.multisig_address(),
            self.from_height,
            self.to_height
        );
        let extraction = extractor
            .parse_routes(&source, self.from_height, self.to_height)
            .await
            .context("Failed to parse routes")?;
        report(&extraction);

        eprintln!(
            "Scanned {} transactions, skipped {} messages",
            extraction.scanned_transactions, extraction.skipped_messages
        );
        eprintln!(
            "Found {} routes with total amount: {}",
            extraction.route_set.len(),
            extraction.route_set.total_amount
        );
        write_artifact(&self.output, &extraction.route_set)?;
        if !is_stdout(&self.output) {
            eprintln!("Routes saved to {}", self.output.display());
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn report(extraction: &Extraction) {
    extraction.diagnostics.iter().for_each(log_diagnostic);
    info!(
        scanned_transactions = extraction.scanned_transactions,
        skipped_messages = extraction.skipped_messages,
        warnings = extraction.warnings().count(),
        routes = extraction.route_set.len(),
        "Extraction finished"
    );
}

fn log_diagnostic(diagnostic: &Diagnostic) {
    match diagnostic.severity {
        Severity::Info => info!(tx_id = %diagnostic.tx_id, "{}", diagnostic.message),
        Severity::Warning => warn!(tx_id = %diagnostic.tx_id, "{}", diagnostic.message),
    }
}
