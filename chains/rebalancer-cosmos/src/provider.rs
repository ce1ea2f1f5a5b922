use async_trait::async_trait;
use cosmrs::{
    proto::cosmos::tx::v1beta1::{TxBody, TxRaw},
    rpc::{
        client::{Client, CompatMode, HttpClient},
        endpoint::tx,
        query::Query,
        HttpClientUrl, Order, Url,
    },
};
use prost::Message;
use rebalancer_core::{DecodedTransaction, TransactionSource, TransactionSourceError};
use tracing::{debug, info, instrument, warn};

use crate::{decode_transfer_message, ConnectionConf, CosmosError};

/// Reads transactions of a height range through CometBFT `tx_search`
#[derive(Debug, Clone)]
pub struct CosmosTransactionSource {
    client: HttpClient,
    conf: ConnectionConf,
}

impl CosmosTransactionSource {
    /// Create a source for the endpoint in `conf`
    pub fn new(conf: ConnectionConf) -> Result<Self, CosmosError> {
        let url = Url::try_from(conf.get_rpc_url().clone()).and_then(HttpClientUrl::try_from)?;
        let client = HttpClient::builder(url)
            .compat_mode(CompatMode::latest())
            .build()?;
        Ok(Self { client, conf })
    }

    async fn search(&self, from: u64, to: u64) -> Result<Vec<DecodedTransaction>, CosmosError> {
        let query = Query::default()
            .and_gte("tx.height", from)
            .and_lte("tx.height", to);
        let per_page = self.conf.get_page_size();

        debug!(query = %query, "Searching transactions");

        let response = self
            .client
            .tx_search(query.clone(), false, 1, per_page, Order::Ascending)
            .await?;

        let total_count = response.total_count;
        let last_page = total_count.div_ceil(u32::from(per_page));

        let mut transactions: Vec<_> = response
            .txs
            .into_iter()
            .filter_map(decode_tx_response)
            .collect();

        for page in 2..=last_page {
            debug!(page, last_page, "Making tx search RPC");

            let response = self
                .client
                .tx_search(query.clone(), false, page, per_page, Order::Ascending)
                .await?;

            transactions.extend(response.txs.into_iter().filter_map(decode_tx_response));
        }

        info!(
            from,
            to,
            total_count,
            decoded = transactions.len(),
            "Fetched transactions"
        );
        Ok(transactions)
    }
}

#[async_trait]
impl TransactionSource for CosmosTransactionSource {
    #[instrument(skip(self))]
    async fn transactions_in_range(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<DecodedTransaction>, TransactionSourceError> {
        if from > to {
            return Err(TransactionSourceError::InvalidRange { from, to });
        }
        Ok(self.search(from, to).await?)
    }
}

fn decode_tx_response(response: tx::Response) -> Option<DecodedTransaction> {
    let hash = response.hash.to_string();
    if response.tx_result.code.is_err() {
        debug!(tx_hash = %hash, "Transaction has failed, skipping");
        return None;
    }
    match decode_tx(hash.clone(), response.height.value(), &response.tx) {
        Ok(tx) => Some(tx),
        Err(err) => {
            warn!(tx_hash = %hash, ?err, "Failed to decode transaction, skipping");
            None
        }
    }
}

/// Decode raw transaction bytes into the memo and the ordered messages
pub fn decode_tx(hash: String, height: u64, bytes: &[u8]) -> Result<DecodedTransaction, CosmosError> {
    let raw = TxRaw::decode(bytes)?;
    let body = TxBody::decode(raw.body_bytes.as_slice())?;
    Ok(DecodedTransaction {
        hash,
        height,
        memo: body.memo,
        messages: body
            .messages
            .iter()
            .map(|any| decode_transfer_message(&any.type_url, &any.value))
            .collect(),
    })
}
