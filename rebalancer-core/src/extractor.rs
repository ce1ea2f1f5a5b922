use crate::{
    BankSend, DecodedTransaction, Diagnostic, MemoRouting, RemoteTransfer, Route, RouteSet,
    RoutingSource, TransactionSource, TransactionSourceError, TransferMessage, Whitelist,
    DEFAULT_DENOM,
};

/// Turns decoded transactions into the routes the multisig has to fulfil.
#[derive(Debug, Clone)]
pub struct RouteExtractor {
    multisig_address: String,
    whitelist: Option<Whitelist>,
    denom: String,
}

/// Result of one extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Admitted routes
    pub route_set: RouteSet,
    /// Findings about skipped or ignored messages, in encounter order
    pub diagnostics: Vec<Diagnostic>,
    /// Number of transactions inspected
    pub scanned_transactions: usize,
    /// Number of multisig messages dropped with a warning
    pub skipped_messages: usize,
}

impl Extraction {
    /// Diagnostics about skipped messages
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// Why a candidate message did not produce a route
type Skip = String;

impl RouteExtractor {
    /// Extract routes for `multisig_address`, without a whitelist
    pub fn new(multisig_address: impl Into<String>) -> Self {
        Self {
            multisig_address: multisig_address.into(),
            whitelist: None,
            denom: DEFAULT_DENOM.to_owned(),
        }
    }

    /// Only admit routes whose recipient is whitelisted
    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.whitelist = Some(whitelist);
        self
    }

    /// Denomination recorded on every route
    pub fn with_denom(mut self, denom: impl Into<String>) -> Self {
        self.denom = denom.into();
        self
    }

    /// The multisig routes are extracted for
    pub fn multisig_address(&self) -> &str {
        &self.multisig_address
    }

    /// Query `source` for the transactions between `from` and `to` and
    /// extract routes from them. Only the query itself can fail.
    pub async fn parse_routes<S>(
        &self,
        source: &S,
        from: u64,
        to: u64,
    ) -> Result<Extraction, TransactionSourceError>
    where
        S: TransactionSource + ?Sized,
    {
        if from > to {
            return Err(TransactionSourceError::InvalidRange { from, to });
        }
        let transactions = source.transactions_in_range(from, to).await?;
        Ok(self.extract(&transactions))
    }

    /// Walk `transactions` in order and collect a route for every admissible
    /// transfer. Problems with single messages are reported as diagnostics
    /// and never abort the run.
    pub fn extract(&self, transactions: &[DecodedTransaction]) -> Extraction {
        let mut extraction = Extraction {
            route_set: RouteSet::new(self.multisig_address.clone()),
            diagnostics: Vec::new(),
            scanned_transactions: 0,
            skipped_messages: 0,
        };

        for tx in transactions {
            extraction.scanned_transactions += 1;
            let memo = MemoRouting::parse(&tx.memo);

            for (index, message) in tx.messages.iter().enumerate() {
                let outcome = match message {
                    TransferMessage::RemoteTransfer(transfer) => {
                        if transfer.sender != self.multisig_address {
                            continue;
                        }
                        self.remote_transfer_route(tx, transfer)
                    }
                    TransferMessage::BankSend(send) => {
                        if send.to_address != self.multisig_address {
                            continue;
                        }
                        match RoutingSource::for_bank_send(memo.as_ref()) {
                            Some(source) => self.bank_send_route(tx, send, source),
                            None => {
                                extraction.diagnostics.push(Diagnostic::info(
                                    &tx.hash,
                                    format!(
                                        "message {index}: bank send into the multisig without routing memo"
                                    ),
                                ));
                                continue;
                            }
                        }
                    }
                    TransferMessage::Undecodable { type_url, reason } => {
                        Err(format!("failed to decode {type_url}: {reason}"))
                    }
                    TransferMessage::Unrecognized { .. } => continue,
                };

                match outcome {
                    Ok(route) => extraction.route_set.push(route),
                    Err(skip) => {
                        extraction.skipped_messages += 1;
                        extraction
                            .diagnostics
                            .push(Diagnostic::warning(&tx.hash, format!("message {index}: {skip}")));
                    }
                }
            }
        }

        extraction
    }

    fn remote_transfer_route(
        &self,
        tx: &DecodedTransaction,
        transfer: &RemoteTransfer,
    ) -> Result<Route, Skip> {
        let source = RoutingSource::for_remote_transfer(transfer)
            .ok_or_else(|| "transfer carries no routing metadata".to_owned())?;
        self.route(tx, &transfer.sender, &transfer.amount, source)
    }

    fn bank_send_route(
        &self,
        tx: &DecodedTransaction,
        send: &BankSend,
        source: RoutingSource,
    ) -> Result<Route, Skip> {
        let amount = send
            .amount_of(&self.denom)
            .ok_or_else(|| format!("bank send carries no {} coins", self.denom))?;
        self.route(tx, &send.from_address, amount, source)
    }

    fn route(
        &self,
        tx: &DecodedTransaction,
        sender: &str,
        amount: &str,
        source: RoutingSource,
    ) -> Result<Route, Skip> {
        let info = source
            .resolve()
            .map_err(|e| format!("invalid routing metadata: {e}"))?;
        if let Some(whitelist) = &self.whitelist {
            whitelist
                .validate(&info)
                .map_err(|e| format!("whitelist validation failed: {e}"))?;
        }
        let amount = info.amount_override().unwrap_or(amount).to_owned();

        Ok(Route {
            source_tx_id: tx.hash.clone(),
            source_height: tx.height,
            sender: sender.to_owned(),
            amount,
            denom: self.denom.clone(),
            raw_metadata: source.raw_metadata().map(str::to_owned),
            route_info: Some(info),
        })
    }
}
