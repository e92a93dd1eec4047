//! Shared types and models for the Weather Ledger
//!
//! This crate contains types shared between the backend, the browser front-end
//! (via WASM), and the integrity hasher used by the ledger.

pub mod fingerprint;
pub mod models;
pub mod presentation;
pub mod types;
pub mod validation;

pub use fingerprint::*;
pub use models::*;
pub use presentation::*;
pub use types::*;
pub use validation::*;
