use std::process::ExitCode;

use async_trait::async_trait;
use clap::Args;
use eyre::Result;
use rebalancer_core::KnownDomain;
use strum::IntoEnumIterator;

use super::ExecuteCmd;
use crate::settings::Settings;

/// List the destination domains known by name
#[derive(Args, Debug)]
pub struct DomainsCmd {}

#[async_trait]
impl ExecuteCmd for DomainsCmd {
    async fn execute(self, _settings: &Settings) -> Result<ExitCode> {
        print!("{}", table());
        Ok(ExitCode::SUCCESS)
    }
}

fn table() -> String {
    let mut domains: Vec<_> = KnownDomain::iter().collect();
    domains.sort_by_key(|domain| domain.as_str());
    domains
        .into_iter()
        .map(|domain| format!("{:<12} {}\n", domain.as_str(), domain.id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::table;

    #[test]
    fn lists_every_domain_by_name() {
        let table = table();

        assert_eq!(table.lines().count(), 11);
        assert!(table.starts_with("arbitrum     42161\n"));
        assert!(table.contains("bsc          56\n"));
        assert!(table.contains("polygon      137\n"));
    }
}
