use serde::{Deserialize, Serialize};

use crate::{MetadataError, RemoteTransfer, RouteInfo};

/// Parse routing instructions from the JSON metadata attached to a transfer
/// and check that the mandatory fields are present.
///
/// `amount` is optional. When absent the override stays unset.
pub fn parse_route_metadata(metadata: &str) -> Result<RouteInfo, MetadataError> {
    let info: RouteInfo = serde_json::from_str(metadata)
        .map_err(|e| MetadataError::MalformedMetadata(e.to_string()))?;
    info.validate()?;
    Ok(info)
}

/// Routing instructions carried in a transaction memo. Applies to every
/// bank send into the multisig within that transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoRouting {
    /// Destination domain
    #[serde(default)]
    pub destination_domain: u32,
    /// Final recipient
    #[serde(default)]
    pub recipient: String,
    /// Warp route token id
    #[serde(default)]
    pub token_id: String,
    /// The memo as it appeared on chain
    #[serde(skip)]
    pub raw: String,
}

impl MemoRouting {
    /// Parse a transaction memo. An empty memo, or one that is not a routing
    /// JSON object, carries no routing instructions.
    pub fn parse(memo: &str) -> Option<Self> {
        if memo.trim().is_empty() {
            return None;
        }
        let mut routing: MemoRouting = serde_json::from_str(memo).ok()?;
        routing.raw = memo.to_owned();
        Some(routing)
    }

    fn to_route_info(&self) -> RouteInfo {
        RouteInfo::new(
            self.destination_domain,
            self.recipient.clone(),
            self.token_id.clone(),
            None,
        )
    }
}

/// Where the routing instructions of one message come from.
///
/// Message level metadata always wins over the transaction memo. The memo is
/// only consulted for bank sends, which have no metadata field of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingSource {
    /// JSON hook metadata attached to a remote transfer
    MessageMetadata(String),
    /// A remote transfer without hook metadata, routed by its own fields
    MessageFields(RouteInfo),
    /// Routing JSON found in the transaction memo
    TransactionMemo(MemoRouting),
}

impl RoutingSource {
    /// Routing source of a remote transfer, `None` if it carries neither
    /// hook metadata nor a destination domain.
    pub fn for_remote_transfer(transfer: &RemoteTransfer) -> Option<Self> {
        if !transfer.hook_metadata.is_empty() {
            return Some(Self::MessageMetadata(transfer.hook_metadata.clone()));
        }
        if transfer.destination_domain == 0 {
            return None;
        }
        Some(Self::MessageFields(RouteInfo::new(
            transfer.destination_domain,
            transfer.recipient.clone(),
            transfer.token_id.clone(),
            None,
        )))
    }

    /// Routing source of a bank send, taken from the transaction memo
    pub fn for_bank_send(memo: Option<&MemoRouting>) -> Option<Self> {
        memo.cloned().map(Self::TransactionMemo)
    }

    /// Resolve into validated routing instructions
    pub fn resolve(&self) -> Result<RouteInfo, MetadataError> {
        let info = match self {
            Self::MessageMetadata(metadata) => return parse_route_metadata(metadata),
            Self::MessageFields(info) => info.clone(),
            Self::TransactionMemo(memo) => memo.to_route_info(),
        };
        info.validate()?;
        Ok(info)
    }

    /// The text the instructions were parsed from, if any
    pub fn raw_metadata(&self) -> Option<&str> {
        match self {
            Self::MessageMetadata(metadata) => Some(metadata),
            Self::MessageFields(_) => None,
            Self::TransactionMemo(memo) => Some(&memo.raw),
        }
    }
}
