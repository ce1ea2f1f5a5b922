use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fs,
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{RouteInfo, WhitelistConfigError, WhitelistError};

/// Approved recipients per destination domain.
///
/// Addresses are compared case insensitively after trimming. A `0x` prefix is
/// part of the compared form, so hex entries only match hex recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    domains: HashMap<u32, HashSet<String>>,
}

impl Whitelist {
    /// Build a whitelist from `(domain, addresses)` pairs
    pub fn from_domains<D, A, S>(domains: D) -> Self
    where
        D: IntoIterator<Item = (u32, A)>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|(domain, addresses)| {
                let addresses = addresses
                    .into_iter()
                    .map(|a| normalize(a.as_ref()))
                    .collect();
                (domain, addresses)
            })
            .collect();
        Self { domains }
    }

    /// Parse a whitelist configuration document
    pub fn from_json(json: &str) -> Result<Self, WhitelistConfigError> {
        let config: WhitelistConfig = serde_json::from_str(json)?;
        Ok(config.into())
    }

    /// Read and parse a whitelist configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WhitelistConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| WhitelistConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check that the route's recipient is approved for its destination domain
    pub fn validate(&self, info: &RouteInfo) -> Result<(), WhitelistError> {
        let domain = info.destination_domain;
        let allowed = self
            .domains
            .get(&domain)
            .ok_or(WhitelistError::UnknownDomain(domain))?;
        if allowed.is_empty() {
            return Err(WhitelistError::EmptyWhitelist(domain));
        }
        if !allowed.contains(&normalize(&info.recipient)) {
            return Err(WhitelistError::NotWhitelisted {
                recipient: info.recipient.clone(),
                domain,
            });
        }
        Ok(())
    }

    /// Number of configured domains
    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    /// Number of approved addresses across all domains
    pub fn address_count(&self) -> usize {
        self.domains.values().map(HashSet::len).sum()
    }
}

impl From<WhitelistConfig> for Whitelist {
    fn from(config: WhitelistConfig) -> Self {
        Self::from_domains(config.whitelist.domains)
    }
}

fn normalize(address: &str) -> String {
    address.trim().to_lowercase()
}

/// On disk form of the whitelist:
/// `{ "whitelist": { "domains": { "<domain>": ["<address>", ...] } } }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistConfig {
    /// Whitelist section
    pub whitelist: WhitelistDomains,
}

/// Addresses keyed by destination domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistDomains {
    /// Approved addresses per domain, as written by the operator
    #[serde(default)]
    pub domains: BTreeMap<u32, Vec<String>>,
}

impl WhitelistConfig {
    /// A starting point for operators to edit
    pub fn example() -> Self {
        let domains = [
            (2340, "0x742d35cc6634c0532925a3b844bc9e7595f0beb0"),
            (1, "0x1234567890123456789012345678901234567890"),
            (137, "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd"),
        ]
        .into_iter()
        .map(|(domain, address)| (domain, vec![address.to_owned()]))
        .collect();
        Self {
            whitelist: WhitelistDomains { domains },
        }
    }

    /// Write the configuration as pretty printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WhitelistConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| WhitelistConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(domain: u32, recipient: &str) -> RouteInfo {
        RouteInfo::new(domain, recipient.to_owned(), "0xdef".to_owned(), None)
    }

    #[test]
    fn matches_case_insensitively() {
        // Given
        let whitelist = Whitelist::from_domains([(
            2340,
            ["  0x742D35CC6634C0532925A3B844BC9E7595F0BEB0 "],
        )]);

        // Then
        for recipient in [
            "0x742d35cc6634c0532925a3b844bc9e7595f0beb0",
            "0x742D35CC6634C0532925A3B844BC9E7595F0BEB0",
            "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0",
        ] {
            assert_eq!(whitelist.validate(&info(2340, recipient)), Ok(()));
        }
    }

    #[test]
    fn rejects_unknown_and_empty_domains() {
        let whitelist = Whitelist::from_domains([(1, Vec::<String>::new())]);

        assert_eq!(
            whitelist.validate(&info(1, "0xabc")),
            Err(WhitelistError::EmptyWhitelist(1))
        );
        assert_eq!(
            whitelist.validate(&info(137, "0xabc")),
            Err(WhitelistError::UnknownDomain(137))
        );
    }

    #[test]
    fn rejects_unlisted_recipient() {
        let whitelist = Whitelist::from_domains([(137, ["0xabc"])]);

        assert_eq!(
            whitelist.validate(&info(137, "0xabd")),
            Err(WhitelistError::NotWhitelisted {
                recipient: "0xabd".to_owned(),
                domain: 137,
            })
        );
    }

    #[test]
    fn hex_prefix_is_part_of_the_address() {
        let whitelist = Whitelist::from_domains([(137, ["0xabc"])]);

        assert!(whitelist.validate(&info(137, "abc")).is_err());
    }

    #[test]
    fn parses_config_document() {
        let json = r#"{
            "whitelist": {
                "domains": {
                    "2340": ["0xAAA", "0xbbb"],
                    "137": []
                }
            }
        }"#;

        let whitelist = Whitelist::from_json(json).unwrap();

        assert_eq!(whitelist.domain_count(), 2);
        assert_eq!(whitelist.address_count(), 2);
        assert_eq!(whitelist.validate(&info(2340, "0xaaa")), Ok(()));
    }

    #[test]
    fn rejects_non_numeric_domain() {
        let json = r#"{"whitelist":{"domains":{"polygon":["0xabc"]}}}"#;

        assert!(matches!(
            Whitelist::from_json(json),
            Err(WhitelistConfigError::Parse(_))
        ));
    }

    #[test]
    fn saves_and_loads_example() {
        // Given
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        // When
        WhitelistConfig::example().save(&path).unwrap();
        let whitelist = Whitelist::load(&path).unwrap();

        // Then
        assert_eq!(whitelist.domain_count(), 3);
        assert_eq!(
            whitelist.validate(&info(2340, "0x742D35CC6634C0532925A3B844BC9E7595F0BEB0")),
            Ok(())
        );
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"2340\""));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = Whitelist::load(dir.path().join("absent.json"));

        assert!(matches!(result, Err(WhitelistConfigError::Io { .. })));
    }
}
