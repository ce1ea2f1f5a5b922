use cosmrs::{proto::cosmos::bank::v1beta1::MsgSend, Any};
use hyperlane_cosmos_rs::hyperlane::warp::v1::MsgRemoteTransfer;
use prost::Message;
use rebalancer_core::{
    address::{decode_and_pad_address, decode_token_id},
    parse_amount, BankSend, OutboundMessage, RemoteTransfer, TransferMessage,
};

/// Type url of a warp route transfer
pub const MSG_REMOTE_TRANSFER_TYPE_URL: &str = "/hyperlane.warp.v1.MsgRemoteTransfer";
/// Type url of a bank send
pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

/// Narrow a transaction message down to the shapes that can carry routing
/// instructions.
pub fn decode_transfer_message(type_url: &str, value: &[u8]) -> TransferMessage {
    let undecodable = |reason: String| TransferMessage::Undecodable {
        type_url: type_url.to_owned(),
        reason,
    };
    match type_url {
        MSG_REMOTE_TRANSFER_TYPE_URL => match decode_remote_transfer(value) {
            Ok(msg) => TransferMessage::RemoteTransfer(RemoteTransfer {
                sender: msg.sender,
                recipient: msg.recipient,
                amount: msg.amount,
                destination_domain: msg.destination_domain,
                token_id: msg.token_id,
                hook_metadata: msg.custom_hook_metadata,
            }),
            Err(reason) => undecodable(reason),
        },
        MSG_SEND_TYPE_URL => match MsgSend::decode(value) {
            Ok(msg) => TransferMessage::BankSend(BankSend {
                from_address: msg.from_address,
                to_address: msg.to_address,
                coins: msg
                    .amount
                    .into_iter()
                    .map(|coin| (coin.amount, coin.denom))
                    .collect(),
            }),
            Err(e) => undecodable(e.to_string()),
        },
        _ => TransferMessage::Unrecognized {
            type_url: type_url.to_owned(),
        },
    }
}

/// Decode a `MsgRemoteTransfer` payload
pub fn decode_remote_transfer(value: &[u8]) -> Result<MsgRemoteTransfer, String> {
    <MsgRemoteTransfer as hyperlane_cosmos_rs::prost::Message>::decode(value)
        .map_err(|e| e.to_string())
}

/// The `MsgRemoteTransfer` fulfilling an outbound message
pub fn remote_transfer_msg(message: &OutboundMessage) -> MsgRemoteTransfer {
    MsgRemoteTransfer {
        sender: message.sender.clone(),
        token_id: message.token_id.to_canonical_hex(),
        destination_domain: message.destination_domain,
        recipient: message.recipient.to_canonical_hex(),
        amount: message.amount.to_string(),
        custom_hook_id: String::new(),
        gas_limit: "0".to_owned(),
        custom_hook_metadata: message.hook_metadata.clone().unwrap_or_default(),
        ..Default::default()
    }
}

/// An outbound message packed into an `Any`
pub fn remote_transfer_any(message: &OutboundMessage) -> Any {
    let msg = remote_transfer_msg(message);
    Any {
        type_url: MSG_REMOTE_TRANSFER_TYPE_URL.to_owned(),
        value: <MsgRemoteTransfer as hyperlane_cosmos_rs::prost::Message>::encode_to_vec(&msg),
    }
}

/// Read a `MsgRemoteTransfer` back into an outbound message. Fails with a
/// description of the first field that does not decode.
pub fn outbound_message(msg: MsgRemoteTransfer) -> Result<OutboundMessage, String> {
    let token_id =
        decode_token_id(&msg.token_id).map_err(|e| format!("invalid token id: {e}"))?;
    let recipient =
        decode_and_pad_address(&msg.recipient).map_err(|e| format!("invalid recipient: {e}"))?;
    let amount =
        parse_amount(&msg.amount).ok_or_else(|| format!("invalid amount `{}`", msg.amount))?;
    let hook_metadata = Some(msg.custom_hook_metadata).filter(|m| !m.is_empty());

    Ok(OutboundMessage {
        sender: msg.sender,
        token_id,
        destination_domain: msg.destination_domain,
        recipient,
        amount,
        hook_metadata,
    })
}
