use std::{path::PathBuf, process::ExitCode};

use async_trait::async_trait;
use clap::Args;
use eyre::{bail, Context, Result};
use rebalancer_core::WhitelistConfig;

use super::ExecuteCmd;
use crate::settings::Settings;

/// Write an example whitelist config
#[derive(Args, Debug)]
pub struct InitConfigCmd {
    /// Where to write the config
    #[arg(long, short, default_value = "config.json")]
    output: PathBuf,
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

#[async_trait]
impl ExecuteCmd for InitConfigCmd {
    async fn execute(self, _settings: &Settings) -> Result<ExitCode> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists, pass --force to overwrite it",
                self.output.display()
            );
        }
        WhitelistConfig::example()
            .save(&self.output)
            .context("Failed to write example config")?;
        eprintln!("Example config written to {}", self.output.display());
        eprintln!("Edit the whitelisted addresses, then pass it to `parse --config`");
        Ok(ExitCode::SUCCESS)
    }
}
