//! Common types used across the ledger

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::UseCase;

/// A weather request as submitted from the form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherQuery {
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub use_case: UseCase,
}

impl WeatherQuery {
    pub fn new(
        location: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        use_case: UseCase,
    ) -> Self {
        Self {
            location: location.into(),
            start_date,
            end_date,
            use_case,
        }
    }
}
