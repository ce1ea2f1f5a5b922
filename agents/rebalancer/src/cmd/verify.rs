use std::{path::PathBuf, process::ExitCode};

use async_trait::async_trait;
use clap::Args;
use colored::Colorize;
use eyre::{Context, Result};
use rebalancer_core::{RouteSet, RouteVerifier, VerificationReport};
use rebalancer_cosmos::parse_candidates;
use tracing::debug;

use super::{read_artifact, read_json, ExecuteCmd};
use crate::settings::Settings;

/// Check a candidate transaction against the routes it should fulfil
#[derive(Args, Debug)]
#[command(
    long_about = "Verify that a multisig transaction contains the correct MsgRemoteTransfer messages matching the parsed routes.

The transaction file may be the message list written by `generate`, an unsigned Cosmos SDK transaction or a TxRaw JSON with base64 body_bytes."
)]
pub struct VerifyCmd {
    /// Routes file to verify against
    #[arg(long, default_value = "routes.json")]
    routes: PathBuf,
    /// Transaction file to verify
    #[arg(long, default_value = "unsigned-tx.json")]
    transaction: PathBuf,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[async_trait]
impl ExecuteCmd for VerifyCmd {
    async fn execute(self, _settings: &Settings) -> Result<ExitCode> {
        eprintln!("Verifying transaction against routes...\n");
        let route_set: RouteSet = read_json(&self.routes)?;
        let (format, candidates) = parse_candidates(&read_artifact(&self.transaction)?)
            .with_context(|| format!("Failed to read transaction {}", self.transaction.display()))?;
        debug!(%format, messages = candidates.messages.len(), "Read candidate transaction");

        let report = RouteVerifier.verify(&route_set, &candidates);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render(&report));
        }

        Ok(if report.valid {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}

/// Human readable form of a report
fn render(report: &VerificationReport) -> String {
    let header = if report.valid {
        "✓ Transaction verification PASSED".green().bold()
    } else {
        "✗ Transaction verification FAILED".red().bold()
    };
    let mut lines = vec![
        header.to_string(),
        format!(
            "  Matched {}/{} routes",
            report.matched_count, report.total_routes
        ),
    ];

    if !report.errors.is_empty() {
        lines.push(format!("\n{}", "Errors:".red()));
        lines.extend(report.errors.iter().map(|error| format!("  - {error}")));
    }
    if !report.warnings.is_empty() {
        lines.push(format!("\n{}", "Warnings:".yellow()));
        lines.extend(report.warnings.iter().map(|warning| format!("  - {warning}")));
    }
    lines.join("\n") + "\n"
}
