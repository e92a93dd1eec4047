//! Domain models for the Weather Ledger

mod ledger;
mod session;
mod weather;

pub use ledger::*;
pub use session::*;
pub use weather::*;
