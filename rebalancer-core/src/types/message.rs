use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::CanonicalAddress;

/// An outbound warp route transfer sent by the multisig
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// The multisig sending the funds
    pub sender: String,
    /// Warp route token id
    pub token_id: CanonicalAddress,
    /// Hyperlane domain of the destination chain
    pub destination_domain: u32,
    /// Padded recipient on the destination chain
    pub recipient: CanonicalAddress,
    /// Base unit amount
    #[serde(with = "crate::decimal_string")]
    pub amount: BigUint,
    /// Optional hook metadata forwarded with the transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_metadata: Option<String>,
}
