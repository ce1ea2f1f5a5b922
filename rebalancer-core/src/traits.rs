use async_trait::async_trait;

use crate::{DecodedTransaction, TransactionSourceError};

/// Interface for retrieving the transactions of a height range from a chain.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch every transaction included between `from` and `to`, both
    /// inclusive, ordered by height and then by position in the block.
    ///
    /// Any failure is fatal for the whole range.
    async fn transactions_in_range(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<DecodedTransaction>, TransactionSourceError>;
}
