//! Observable session state

use serde::{Deserialize, Serialize};

use crate::models::{Ledger, WeatherSnapshot};

/// Everything the presentation layer renders from
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub snapshot: Option<WeatherSnapshot>,
    pub ledger: Ledger,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}
