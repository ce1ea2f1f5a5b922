use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::Serialize;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Destination domains the rebalancer knows a name for.
#[derive(
    FromPrimitive,
    PartialEq,
    Eq,
    Debug,
    Clone,
    Copy,
    Hash,
    Serialize,
    strum::Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum KnownDomain {
    Ethereum = 1,
    Optimism = 10,
    #[strum(serialize = "bsc")]
    BinanceSmartChain = 56,
    Gnosis = 100,
    Polygon = 137,
    Moonbeam = 1284,
    Arbitrum = 42161,
    Celo = 42220,
    Avalanche = 43114,
    Celestia = 69420,
    Scroll = 534352,
}

impl KnownDomain {
    /// Domain id
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Look up a domain by id
    pub fn from_id(domain_id: u32) -> Option<Self> {
        FromPrimitive::from_u32(domain_id)
    }

    /// `name (id)` for known domains, the bare id otherwise
    pub fn describe(domain_id: u32) -> String {
        match Self::from_id(domain_id) {
            Some(domain) => format!("{domain} ({domain_id})"),
            None => domain_id.to_string(),
        }
    }
}
