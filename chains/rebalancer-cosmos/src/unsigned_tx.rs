use derive_new::new;
use rebalancer_core::{CandidateMessages, OutboundMessage};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{outbound_message, CosmosError, MSG_REMOTE_TRANSFER_TYPE_URL};

/// Gas limit put on unsigned transactions unless configured otherwise
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// An unsigned Cosmos SDK transaction in the JSON shape written by
/// `tx ... --generate-only`, ready to be signed by the multisig members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsignedTx {
    /// Transaction body
    pub body: UnsignedTxBody,
    /// Fee and signer information
    pub auth_info: AuthInfo,
    /// Always empty until signed
    #[serde(default)]
    pub signatures: Vec<String>,
}

/// Body of an [`UnsignedTx`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsignedTxBody {
    /// Messages as `@type` tagged JSON objects
    pub messages: Vec<Value>,
    /// Transaction memo
    #[serde(default)]
    pub memo: String,
    /// Timeout height, `"0"` for none
    #[serde(default = "zero")]
    pub timeout_height: String,
    /// Extension options
    #[serde(default)]
    pub extension_options: Vec<Value>,
    /// Non critical extension options
    #[serde(default)]
    pub non_critical_extension_options: Vec<Value>,
}

/// Fee and signer section of an [`UnsignedTx`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthInfo {
    /// Filled in while signing
    #[serde(default)]
    pub signer_infos: Vec<Value>,
    /// Fee
    pub fee: Fee,
}

/// Transaction fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    /// Fee coins
    #[serde(default)]
    pub amount: Vec<JsonCoin>,
    /// Gas limit as a decimal string
    pub gas_limit: String,
    /// Fee payer, empty for the first signer
    #[serde(default)]
    pub payer: String,
    /// Fee granter
    #[serde(default)]
    pub granter: String,
}

/// A coin in its JSON form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct JsonCoin {
    /// Denomination
    pub denom: String,
    /// Amount as a decimal string
    pub amount: String,
}

/// JSON form of a `MsgRemoteTransfer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTransferJson {
    /// Type url
    #[serde(rename = "@type")]
    pub type_url: String,
    /// Sender account
    pub sender: String,
    /// Token id as `0x` hex
    pub token_id: String,
    /// Destination domain
    #[serde(deserialize_with = "u32_from_number_or_string")]
    pub destination_domain: u32,
    /// Recipient as `0x` hex
    pub recipient: String,
    /// Amount as a decimal string
    pub amount: String,
    /// Custom hook, empty for the default hook
    #[serde(default)]
    pub custom_hook_id: String,
    /// Gas limit for the hook
    #[serde(default = "zero")]
    pub gas_limit: String,
    /// Maximum interchain gas fee
    #[serde(default)]
    pub max_fee: Option<JsonCoin>,
    /// Custom hook metadata
    #[serde(default)]
    pub custom_hook_metadata: String,
}

/// Knobs for building an [`UnsignedTx`]
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct UnsignedTxOptions {
    /// Transaction memo
    pub memo: String,
    /// Transaction gas limit
    pub gas_limit: u64,
    /// Denomination of the fee and of the transfers' max fee
    pub denom: String,
}

impl UnsignedTx {
    /// Wrap `messages` into an unsigned transaction
    pub fn from_messages(
        messages: &[OutboundMessage],
        options: &UnsignedTxOptions,
    ) -> Result<Self, CosmosError> {
        let messages = messages
            .iter()
            .map(|message| {
                let msg = crate::remote_transfer_msg(message);
                let json = RemoteTransferJson {
                    type_url: MSG_REMOTE_TRANSFER_TYPE_URL.to_owned(),
                    sender: msg.sender,
                    token_id: msg.token_id,
                    destination_domain: msg.destination_domain,
                    recipient: msg.recipient,
                    amount: msg.amount,
                    custom_hook_id: msg.custom_hook_id,
                    gas_limit: msg.gas_limit,
                    max_fee: Some(JsonCoin::new(options.denom.clone(), "0".to_owned())),
                    custom_hook_metadata: msg.custom_hook_metadata,
                };
                serde_json::to_value(json)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            body: UnsignedTxBody {
                messages,
                memo: options.memo.clone(),
                timeout_height: zero(),
                extension_options: Vec::new(),
                non_critical_extension_options: Vec::new(),
            },
            auth_info: AuthInfo {
                signer_infos: Vec::new(),
                fee: Fee {
                    amount: Vec::new(),
                    gas_limit: options.gas_limit.to_string(),
                    payer: String::new(),
                    granter: String::new(),
                },
            },
            signatures: Vec::new(),
        })
    }

    /// The remote transfers in the body. Anything else is ignored with a
    /// warning.
    pub fn candidate_messages(&self) -> CandidateMessages {
        let mut candidates = CandidateMessages::default();
        for (index, message) in self.body.messages.iter().enumerate() {
            let type_url = message
                .get("@type")
                .and_then(Value::as_str)
                .unwrap_or_default();
            if type_url != MSG_REMOTE_TRANSFER_TYPE_URL {
                candidates
                    .warnings
                    .push(format!("message {index}: ignoring {type_url:?} message"));
                continue;
            }
            let decoded = serde_json::from_value::<RemoteTransferJson>(message.clone())
                .map_err(|e| e.to_string())
                .and_then(|json| outbound_message(json.into()));
            match decoded {
                Ok(message) => candidates.messages.push(message),
                Err(reason) => candidates
                    .warnings
                    .push(format!("message {index}: ignoring undecodable transfer: {reason}")),
            }
        }
        candidates
    }
}

impl From<RemoteTransferJson> for hyperlane_cosmos_rs::hyperlane::warp::v1::MsgRemoteTransfer {
    fn from(json: RemoteTransferJson) -> Self {
        Self {
            sender: json.sender,
            token_id: json.token_id,
            destination_domain: json.destination_domain,
            recipient: json.recipient,
            amount: json.amount,
            custom_hook_id: json.custom_hook_id,
            gas_limit: json.gas_limit,
            custom_hook_metadata: json.custom_hook_metadata,
            ..Default::default()
        }
    }
}

fn zero() -> String {
    "0".to_owned()
}

fn u32_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use rebalancer_core::address::{decode_and_pad_address, decode_token_id};
    use serde_json::json;

    use super::*;

    const TOKEN_ID: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

    fn message(domain: u32) -> OutboundMessage {
        OutboundMessage {
            sender: "celestia1multisig".to_owned(),
            token_id: decode_token_id(TOKEN_ID).unwrap(),
            destination_domain: domain,
            recipient: decode_and_pad_address("0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0")
                .unwrap(),
            amount: BigUint::from(1_000_000u32),
            hook_metadata: None,
        }
    }

    fn options() -> UnsignedTxOptions {
        UnsignedTxOptions::new("rebalance".to_owned(), DEFAULT_GAS_LIMIT, "utia".to_owned())
    }

    #[test]
    fn writes_generate_only_shape() {
        // Given
        let tx = UnsignedTx::from_messages(&[message(1380012617)], &options()).unwrap();

        // When
        let json = serde_json::to_value(&tx).unwrap();

        // Then
        let msg = &json["body"]["messages"][0];
        assert_eq!(msg["@type"], "/hyperlane.warp.v1.MsgRemoteTransfer");
        assert_eq!(msg["sender"], "celestia1multisig");
        assert_eq!(msg["destination_domain"], 1380012617);
        assert_eq!(msg["amount"], "1000000");
        assert_eq!(msg["token_id"], TOKEN_ID);
        assert_eq!(msg["custom_hook_id"], "");
        assert_eq!(msg["gas_limit"], "0");
        assert_eq!(msg["max_fee"], json!({"denom": "utia", "amount": "0"}));
        assert_eq!(json["body"]["memo"], "rebalance");
        assert_eq!(json["body"]["timeout_height"], "0");
        assert_eq!(json["auth_info"]["fee"]["gas_limit"], "200000");
        assert_eq!(json["auth_info"]["fee"]["amount"], json!([]));
        assert_eq!(json["signatures"], json!([]));
    }

    #[test]
    fn reads_back_its_own_messages() {
        let messages = [message(1380012617), message(137)];
        let tx = UnsignedTx::from_messages(&messages, &options()).unwrap();
        let json = serde_json::to_string_pretty(&tx).unwrap();

        let tx: UnsignedTx = serde_json::from_str(&json).unwrap();
        let candidates = tx.candidate_messages();

        assert_eq!(candidates.messages, messages);
        assert!(candidates.warnings.is_empty());
    }

    #[test]
    fn warns_about_other_and_broken_messages() {
        // Given
        let tx = json!({
            "body": {
                "messages": [
                    {"@type": "/cosmos.bank.v1beta1.MsgSend", "from_address": "a", "to_address": "b", "amount": []},
                    {
                        "@type": "/hyperlane.warp.v1.MsgRemoteTransfer",
                        "sender": "celestia1multisig",
                        "token_id": "0xabcd",
                        "destination_domain": "137",
                        "recipient": "0x01",
                        "amount": "5"
                    },
                    {
                        "@type": "/hyperlane.warp.v1.MsgRemoteTransfer",
                        "sender": "celestia1multisig",
                        "token_id": TOKEN_ID,
                        "destination_domain": "137",
                        "recipient": "0x01",
                        "amount": "5"
                    }
                ]
            },
            "auth_info": {"fee": {"gas_limit": "200000"}}
        });

        // When
        let tx: UnsignedTx = serde_json::from_value(tx).unwrap();
        let candidates = tx.candidate_messages();

        // Then
        assert_eq!(candidates.messages.len(), 1);
        assert_eq!(candidates.messages[0].destination_domain, 137);
        assert_eq!(candidates.warnings.len(), 2);
        assert!(candidates.warnings[0].contains("MsgSend"));
        assert!(candidates.warnings[1].contains("invalid token id"));
    }
}
