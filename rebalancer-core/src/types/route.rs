use derive_new::new;
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{parse_amount, MetadataError};

/// Routing instructions attached to an inbound transfer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RouteInfo {
    /// Hyperlane domain of the chain the funds are forwarded to
    #[serde(default)]
    pub destination_domain: u32,
    /// Final recipient, `0x` hex or bech32
    #[serde(default)]
    pub recipient: String,
    /// Warp route token id, 32 bytes of hex
    #[serde(default)]
    pub token_id: String,
    /// Overrides the amount received by the multisig when present
    #[serde(
        default,
        rename = "amount",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub amount_override: Option<String>,
}

impl RouteInfo {
    /// Check the three mandatory fields. A destination domain of 0 counts as
    /// absent.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.destination_domain == 0 {
            return Err(MetadataError::MissingField("destination_domain"));
        }
        if self.recipient.is_empty() {
            return Err(MetadataError::MissingField("recipient"));
        }
        if self.token_id.is_empty() {
            return Err(MetadataError::MissingField("token_id"));
        }
        Ok(())
    }

    /// The amount override, if one was given
    pub fn amount_override(&self) -> Option<&str> {
        self.amount_override.as_deref().filter(|a| !a.is_empty())
    }
}

/// One resolved instruction to forward funds received in one transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Hash of the transaction the transfer was found in
    #[serde(alias = "tx_hash")]
    pub source_tx_id: String,
    /// Height of that transaction
    #[serde(alias = "block_height")]
    pub source_height: u64,
    /// Sender of the transfer. For bank sends into the multisig this is the
    /// depositor, not the multisig.
    #[serde(alias = "from")]
    pub sender: String,
    /// Base unit amount as a decimal string
    pub amount: String,
    /// Denomination of `amount`
    pub denom: String,
    /// The metadata the route info was parsed from
    #[serde(
        default,
        alias = "custom_hook_metadata",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub raw_metadata: Option<String>,
    /// Parsed routing instructions
    #[serde(default)]
    pub route_info: Option<RouteInfo>,
}

impl Route {
    /// The amount to forward: the route info override if present, the
    /// transfer amount otherwise.
    pub fn effective_amount(&self) -> &str {
        self.route_info
            .as_ref()
            .and_then(RouteInfo::amount_override)
            .unwrap_or(&self.amount)
    }
}

/// Ordered routes found for one multisig, with the sum of their amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSet {
    /// Routes in the order they were encountered
    pub routes: Vec<Route>,
    /// Sum of every route's effective amount
    #[serde(with = "crate::decimal_string")]
    pub total_amount: BigUint,
    /// The multisig the routes were extracted for
    #[serde(alias = "multisig_addr")]
    pub multisig_address: String,
}

impl RouteSet {
    /// An empty set for `multisig_address`
    pub fn new(multisig_address: impl Into<String>) -> Self {
        Self {
            routes: Vec::new(),
            total_amount: BigUint::default(),
            multisig_address: multisig_address.into(),
        }
    }

    /// Append a route, adding its effective amount to the total. An amount
    /// that does not parse contributes nothing to the total, the route is
    /// kept regardless.
    pub fn push(&mut self, route: Route) {
        if let Some(amount) = parse_amount(route.effective_amount()) {
            self.total_amount += amount;
        }
        self.routes.push(route);
    }

    /// Number of routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no route was found
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
