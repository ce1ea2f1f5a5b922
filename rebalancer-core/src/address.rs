//! Addresses and token ids show up as `0x` hex (EVM style and Hyperlane
//! token ids) or as bech32 Cosmos accounts. Outbound messages always carry
//! the canonical 32 byte form, left padded with zeros.

use crate::{AddressError, CanonicalAddress};

const HEX_PREFIX: &str = "0x";

/// Strips the '0x' prefix off of hex string so it can be deserialized.
pub fn strip_0x_prefix(s: &str) -> &str {
    s.strip_prefix(HEX_PREFIX).unwrap_or(s)
}

/// Lowercase a hex string and drop its `0x` prefix. Used to compare token ids
/// given in any case.
pub fn normalize_hex(s: &str) -> String {
    strip_0x_prefix(&s.to_lowercase()).to_owned()
}

/// Decode a warp route token id. It must be hex, optionally `0x` prefixed,
/// and exactly 32 bytes long.
pub fn decode_token_id(token_id: &str) -> Result<CanonicalAddress, AddressError> {
    let bytes = decode_hex(strip_0x_prefix(token_id))?;
    let bytes: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| AddressError::InvalidTokenId(bytes.len()))?;
    Ok(bytes.into())
}

/// Decode a recipient address into its canonical 32 byte form.
///
/// `0x` prefixed input is decoded as raw hex bytes, anything else as a bech32
/// account address. Either way the bytes are left padded to 32 bytes.
pub fn decode_and_pad_address(address: &str) -> Result<CanonicalAddress, AddressError> {
    let bytes = match address.strip_prefix(HEX_PREFIX) {
        Some(hex) => decode_hex(hex)?,
        None => decode_bech32(address)?,
    };
    CanonicalAddress::from_padded(&bytes).ok_or(AddressError::AddressTooLong(bytes.len()))
}

/// Lowercase `0x` prefixed hex of a canonical address
pub fn to_canonical_hex(address: &CanonicalAddress) -> String {
    address.to_canonical_hex()
}

/// Canonical hex of an address given in either hex or bech32 form, so the two
/// forms of the same account compare equal.
pub fn canonical_hex(address: &str) -> Result<String, AddressError> {
    decode_and_pad_address(address).map(|a| a.to_canonical_hex())
}

/// Raw bytes of a bech32 string, whatever its human readable part
pub fn decode_bech32(address: &str) -> Result<Vec<u8>, AddressError> {
    let (_hrp, bytes) =
        bech32::decode(address).map_err(|e| AddressError::InvalidBech32(e.to_string()))?;
    Ok(bytes)
}

fn decode_hex(s: &str) -> Result<Vec<u8>, AddressError> {
    hex::decode(s).map_err(|e| AddressError::InvalidEncoding(e.to_string()))
}
