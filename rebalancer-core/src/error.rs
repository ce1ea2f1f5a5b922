use std::error::Error as StdError;

/// Errors converting between address encodings and the canonical 32 byte form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Token ids must decode to exactly 32 bytes
    #[error("token id must be exactly 32 bytes, got {0} bytes")]
    InvalidTokenId(usize),
    /// The input was expected to be hex but was not
    #[error("invalid hex encoding: {0}")]
    InvalidEncoding(String),
    /// The input was expected to be a bech32 account address but was not
    #[error("invalid bech32 address: {0}")]
    InvalidBech32(String),
    /// The decoded address does not fit into 32 bytes
    #[error("address is {0} bytes long, which does not fit into 32 bytes")]
    AddressTooLong(usize),
}

/// Errors parsing routing metadata attached to a transfer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    /// The metadata is not a JSON object of the expected shape
    #[error("failed to parse routing metadata as JSON: {0}")]
    MalformedMetadata(String),
    /// A mandatory field is absent or empty
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Rejections raised by the recipient whitelist
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WhitelistError {
    /// The destination domain has no whitelist entry at all
    #[error("domain {0} is not configured in whitelist")]
    UnknownDomain(u32),
    /// The destination domain is configured with no addresses
    #[error("domain {0} has no whitelisted addresses")]
    EmptyWhitelist(u32),
    /// The recipient is not in the domain's whitelist
    #[error("recipient {recipient} is not whitelisted for domain {domain}")]
    NotWhitelisted {
        /// recipient as it appeared in the routing metadata
        recipient: String,
        /// destination domain
        domain: u32,
    },
}

/// Errors loading a whitelist configuration artifact
#[derive(Debug, thiserror::Error)]
pub enum WhitelistConfigError {
    /// Reading or writing the configuration file failed
    #[error("failed to access whitelist config {path}: {source}")]
    Io {
        /// path of the configuration file
        path: String,
        /// underlying io error
        source: std::io::Error,
    },
    /// The configuration is not valid JSON of the expected shape
    #[error("failed to parse whitelist config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors building outbound messages from routes.
///
/// Any of these aborts generation, a partially generated message set must
/// never reach the signers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// The route carries no routing information
    #[error("route from tx {tx_id} has no routing info")]
    MissingRouteInfo {
        /// source transaction of the route
        tx_id: String,
    },
    /// The effective amount is not a non-negative integer
    #[error("invalid amount {amount} in route from tx {tx_id}")]
    InvalidAmount {
        /// the offending amount string
        amount: String,
        /// source transaction of the route
        tx_id: String,
    },
    /// The token id could not be decoded
    #[error("invalid token_id in route from tx {tx_id}: {source}")]
    InvalidTokenId {
        /// source transaction of the route
        tx_id: String,
        /// decoding failure
        source: AddressError,
    },
    /// The recipient could not be decoded and padded
    #[error("invalid recipient address in route from tx {tx_id}: {source}")]
    InvalidRecipient {
        /// source transaction of the route
        tx_id: String,
        /// decoding failure
        source: AddressError,
    },
}

/// Errors raised by a [`crate::TransactionSource`]. Always fatal for the
/// operation that issued the query.
#[derive(Debug, thiserror::Error)]
pub enum TransactionSourceError {
    /// The requested height range is empty
    #[error("invalid height range: from {from} is above to {to}")]
    InvalidRange {
        /// first height of the range
        from: u64,
        /// last height of the range
        to: u64,
    },
    /// The source could not be queried
    #[error("failed to query transactions: {0}")]
    Query(Box<dyn StdError + Send + Sync>),
}

impl TransactionSourceError {
    /// Wrap any error raised while talking to the chain
    pub fn from_other<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Query(Box::new(err))
    }
}
