//! HTTP request handlers

pub mod health;
pub mod ledger;
pub mod weather;

pub use health::*;
pub use ledger::*;
pub use weather::*;
