use std::fmt::{Debug, Display, Formatter};

use primitive_types::{H160, H256};

/// Fixed 32 byte address used by outbound Hyperlane messages.
///
/// Shorter native addresses (20 byte EVM or Cosmos accounts) occupy the low
/// bytes and are left padded with zeros.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CanonicalAddress(H256);

impl CanonicalAddress {
    /// Length of a canonical address in bytes
    pub const LEN: usize = 32;

    /// Left pad `bytes` with zeros to 32 bytes. Returns `None` if `bytes` is
    /// longer than 32 bytes.
    pub fn from_padded(bytes: &[u8]) -> Option<Self> {
        let start = Self::LEN.checked_sub(bytes.len())?;
        let mut address = Self::default();
        address.as_mut()[start..].copy_from_slice(bytes);
        Some(address)
    }

    /// Lowercase, `0x` prefixed hex rendering of all 32 bytes
    pub fn to_canonical_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0.as_bytes()))
    }

    /// Check if the address is a left padded 20 byte address. This checks
    /// that the first 12 bytes are all 0.
    pub fn is_20_byte_address(&self) -> bool {
        self.0.as_bytes()[0..12].iter().all(|b| *b == 0)
    }

    /// Underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<H256> for CanonicalAddress {
    fn from(address: H256) -> Self {
        CanonicalAddress(address)
    }
}

impl From<[u8; 32]> for CanonicalAddress {
    fn from(bytes: [u8; 32]) -> Self {
        CanonicalAddress(H256::from(bytes))
    }
}

impl From<H160> for CanonicalAddress {
    fn from(address: H160) -> Self {
        let mut id = CanonicalAddress::default();
        id.as_mut()[12..].copy_from_slice(address.as_ref());
        id
    }
}

impl From<CanonicalAddress> for H256 {
    fn from(addr: CanonicalAddress) -> Self {
        addr.0
    }
}

impl AsRef<[u8]> for CanonicalAddress {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl AsMut<[u8]> for CanonicalAddress {
    fn as_mut(&mut self) -> &mut [u8] {
        self.0.as_mut()
    }
}

impl Display for CanonicalAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_canonical_hex())
    }
}

impl Debug for CanonicalAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "CanonicalAddress({})", self.to_canonical_hex())
    }
}
