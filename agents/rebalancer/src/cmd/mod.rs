use std::{fs, path::Path, process::ExitCode};

use async_trait::async_trait;
use eyre::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

use crate::settings::Settings;

pub use self::{
    domains::DomainsCmd, generate::GenerateCmd, init_config::InitConfigCmd, parse::ParseCmd,
    verify::VerifyCmd,
};

mod domains;
mod generate;
mod init_config;
mod parse;
mod verify;

/// Path that stands for stdout
const STDOUT: &str = "-";

/// A subcommand of the rebalancer
#[async_trait]
pub trait ExecuteCmd {
    /// Run the command with the loaded settings
    async fn execute(self, settings: &Settings) -> Result<ExitCode>;
}

/// Pretty print `value` as JSON into `path`, or to stdout for `-`
pub(crate) fn write_artifact<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    if is_stdout(path) {
        println!("{json}");
        return Ok(());
    }
    fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write output file {}", path.display()))
}

/// Whether `path` stands for stdout
pub(crate) fn is_stdout(path: &Path) -> bool {
    path == Path::new(STDOUT)
}

pub(crate) fn read_artifact(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    serde_json::from_str(&read_artifact(path)?)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
