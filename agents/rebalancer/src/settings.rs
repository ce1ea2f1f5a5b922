//! Settings shared by every command.
//!
//! Values are read from an optional JSON settings file and then from
//! `REBALANCER_` prefixed environment variables, e.g. `REBALANCER_RPC_URL` or
//! `REBALANCER_LOG__LEVEL`. Command line flags win over both.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use eyre::{Context, Result};
use rebalancer_core::DEFAULT_DENOM;
use serde::Deserialize;

use crate::trace::TracingConfig;

const ENV_PREFIX: &str = "REBALANCER";
const DEFAULT_RPC_URL: &str = "http://localhost:26657";
const DEFAULT_PAGE_SIZE: u32 = 100;

/// Rebalancer settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// CometBFT RPC endpoint of the chain the multisig lives on
    pub rpc_url: String,
    /// Denomination of received transfers and of fees
    pub denom: String,
    /// Page size for transaction search
    pub page_size: u32,
    /// Logging setup
    pub log: TracingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_owned(),
            denom: DEFAULT_DENOM.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            log: TracingConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, if given, overlaid with the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Json));
        }

        builder
            .add_source(environment.prefix_separator("_").separator("__"))
            .build()
            .context("Failed to load config sources")?
            .try_deserialize()
            .context("Config deserialization error")
    }
}
