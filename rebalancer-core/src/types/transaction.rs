/// A transaction as delivered by a [`crate::TransactionSource`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedTransaction {
    /// Transaction hash
    pub hash: String,
    /// Height the transaction was included at
    pub height: u64,
    /// Transaction level memo, possibly empty
    pub memo: String,
    /// Messages in the order they appear in the transaction body
    pub messages: Vec<TransferMessage>,
}

/// A decoded transaction message, narrowed down to the shapes that can carry
/// routing instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferMessage {
    /// A cross chain warp route transfer
    RemoteTransfer(RemoteTransfer),
    /// A same chain bank send
    BankSend(BankSend),
    /// A message of any other type
    Unrecognized {
        /// protobuf type url of the message
        type_url: String,
    },
    /// A message of a recognised type whose payload failed to decode
    Undecodable {
        /// protobuf type url of the message
        type_url: String,
        /// decoding failure
        reason: String,
    },
}

/// Fields of a `MsgRemoteTransfer` the rebalancer cares about
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteTransfer {
    /// Sender account
    pub sender: String,
    /// Recipient as `0x` hex
    pub recipient: String,
    /// Amount as a decimal string
    pub amount: String,
    /// Destination domain
    pub destination_domain: u32,
    /// Token id as `0x` hex
    pub token_id: String,
    /// Custom hook metadata, possibly empty
    pub hook_metadata: String,
}

/// Fields of a `MsgSend` the rebalancer cares about
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BankSend {
    /// Sender account
    pub from_address: String,
    /// Receiving account
    pub to_address: String,
    /// `(amount, denom)` of every coin sent, in message order
    pub coins: Vec<(String, String)>,
}

impl BankSend {
    /// Amount sent in `denom`, if any coin of that denomination was sent
    pub fn amount_of(&self, denom: &str) -> Option<&str> {
        self.coins
            .iter()
            .find(|(_, coin_denom)| coin_denom == denom)
            .map(|(amount, _)| amount.as_str())
    }
}
