//! Core of the Hyperlane multisig rebalancer.
//!
//! Scans decoded transactions for transfers carrying routing instructions,
//! turns the resulting routes into outbound `MsgRemoteTransfer` messages and
//! verifies a candidate message set against the routes before it is signed.
//!
//! Everything in this crate is a synchronous transformation over already
//! materialized data. Chain access is delegated to a [`TransactionSource`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use self::{
    diagnostics::*, domains::*, error::*, extractor::*, generator::*, metadata::*, traits::*,
    types::*, verifier::*, whitelist::*,
};

/// Conversion between human readable addresses and their 32 byte form
pub mod address;
mod diagnostics;
mod domains;
mod error;
mod extractor;
mod generator;
mod metadata;
mod traits;
mod types;
mod verifier;
mod whitelist;

/// Denomination recorded on every extracted route unless configured otherwise.
pub const DEFAULT_DENOM: &str = "utia";
