//! Cosmos side of the rebalancer: reading transfers from a CometBFT RPC
//! endpoint and encoding outbound transfers as Cosmos SDK messages.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod candidates;
mod conf;
mod error;
mod messages;
mod provider;
mod unsigned_tx;

pub use self::{
    candidates::*, conf::*, error::*, messages::*, provider::*, unsigned_tx::*,
};
