pub use self::{amount::*, identifiers::*, message::*, route::*, transaction::*};

mod amount;
mod identifiers;
mod message;
mod route;
mod transaction;
