use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use cosmrs::proto::cosmos::tx::v1beta1::TxBody;
use prost::Message;
use rebalancer_core::{CandidateMessages, OutboundMessage};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    decode_remote_transfer, outbound_message, CosmosError, UnsignedTx,
    MSG_REMOTE_TRANSFER_TYPE_URL,
};

/// Shapes a candidate transaction file can come in
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum CandidateFormat {
    /// A JSON array of outbound messages as written by `generate`
    MessageList,
    /// A Cosmos SDK unsigned transaction
    UnsignedTx,
    /// A `TxRaw` with base64 `body_bytes`
    TxRaw,
}

#[derive(Deserialize)]
struct TxRawJson {
    body_bytes: String,
}

/// Detect the shape of a candidate transaction document
pub fn detect_format(value: &Value) -> Result<CandidateFormat, CosmosError> {
    match value {
        Value::Array(_) => Ok(CandidateFormat::MessageList),
        Value::Object(map) if map.contains_key("body_bytes") => Ok(CandidateFormat::TxRaw),
        Value::Object(map) if map.contains_key("body") => Ok(CandidateFormat::UnsignedTx),
        _ => Err(CosmosError::UnknownTransactionFormat),
    }
}

/// Read the outbound transfers out of a candidate transaction document
pub fn parse_candidates(json: &str) -> Result<(CandidateFormat, CandidateMessages), CosmosError> {
    let value: Value = serde_json::from_str(json)?;
    let format = detect_format(&value)?;
    let candidates: CandidateMessages = match format {
        CandidateFormat::MessageList => {
            let messages: Vec<OutboundMessage> = serde_json::from_value(value)?;
            messages.into()
        }
        CandidateFormat::UnsignedTx => {
            let tx: UnsignedTx = serde_json::from_value(value)?;
            tx.candidate_messages()
        }
        CandidateFormat::TxRaw => {
            let raw: TxRawJson = serde_json::from_value(value)?;
            let body = TxBody::decode(BASE64.decode(raw.body_bytes)?.as_slice())?;
            body_candidates(&body)
        }
    };
    Ok((format, candidates))
}

fn body_candidates(body: &TxBody) -> CandidateMessages {
    let mut candidates = CandidateMessages::default();
    for (index, any) in body.messages.iter().enumerate() {
        if any.type_url != MSG_REMOTE_TRANSFER_TYPE_URL {
            candidates
                .warnings
                .push(format!("message {index}: ignoring {:?} message", any.type_url));
            continue;
        }
        match decode_remote_transfer(&any.value).and_then(outbound_message) {
            Ok(message) => candidates.messages.push(message),
            Err(reason) => candidates
                .warnings
                .push(format!("message {index}: ignoring undecodable transfer: {reason}")),
        }
    }
    candidates
}
