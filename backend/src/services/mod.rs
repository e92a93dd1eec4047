//! Business logic services for the Weather Ledger

pub mod controller;
pub mod oracle;

pub use controller::{LedgerController, SubmitOutcome, FETCH_FAILED_MESSAGE};
pub use oracle::{OracleError, WeatherOracle};
