use rebalancer_core::TransactionSourceError;

/// Errors from talking to a Cosmos chain or decoding its payloads.
/// Converts into the broader [`TransactionSourceError`] used by the core.
#[derive(Debug, thiserror::Error)]
pub enum CosmosError {
    /// The configured RPC url cannot be used
    #[error("invalid rpc url `{url}`: {reason}")]
    InvalidRpcUrl {
        /// url as configured
        url: String,
        /// why it was rejected
        reason: String,
    },
    /// tx_search pages hold between 1 and 100 transactions
    #[error("page size must be between 1 and {max}, got {0}", max = crate::MAX_PAGE_SIZE)]
    InvalidPageSize(u32),
    /// Tendermint RPC error
    #[error(transparent)]
    Rpc(#[from] cosmrs::rpc::Error),
    /// Protobuf decoding error
    #[error(transparent)]
    Decode(#[from] prost::DecodeError),
    /// Base64 decoding error
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    /// JSON error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// A candidate transaction document in none of the supported shapes
    #[error("unrecognised transaction format: expected a message list, an unsigned tx or a TxRaw with body_bytes")]
    UnknownTransactionFormat,
}

impl From<CosmosError> for TransactionSourceError {
    fn from(value: CosmosError) -> Self {
        TransactionSourceError::from_other(value)
    }
}
