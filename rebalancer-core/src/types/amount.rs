use std::str::FromStr;

use num_bigint::BigUint;

/// Parse a base unit amount. Only plain decimal digits are accepted; signs,
/// whitespace and separators are rejected.
pub fn parse_amount(amount: &str) -> Option<BigUint> {
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::from_str(amount).ok()
}

/// Serde adaptor rendering a [`BigUint`] as a decimal string.
pub mod decimal_string {
    use num_bigint::BigUint;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serialize as a decimal string
    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    /// Deserialize from a decimal string
    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_amount(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid decimal amount {s:?}")))
    }
}
