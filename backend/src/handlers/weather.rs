//! HTTP handlers for weather queries and session state

use axum::{extract::State, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::{
    page_view, validate_date_range, validate_location, LedgerEntry, PageView, SessionState,
    UseCase, WeatherQuery, WeatherSnapshot,
};

use crate::error::{AppError, AppResult};
use crate::services::SubmitOutcome;
use crate::AppState;

/// Form submission body
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QueryInput {
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub use_case: UseCase,
}

impl QueryInput {
    /// Apply the form's constraints relative to `today`
    pub fn into_query(self, today: NaiveDate) -> AppResult<WeatherQuery> {
        self.validate()?;

        validate_location(&self.location).map_err(|msg| AppError::Validation {
            field: "location".to_string(),
            message: msg.to_string(),
        })?;

        validate_date_range(self.start_date, self.end_date, today).map_err(|msg| {
            let field = if self.start_date > self.end_date {
                "startDate"
            } else {
                "endDate"
            };
            AppError::Validation {
                field: field.to_string(),
                message: msg.to_string(),
            }
        })?;

        Ok(WeatherQuery::new(
            self.location,
            self.start_date,
            self.end_date,
            self.use_case,
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub snapshot: WeatherSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_entry: Option<LedgerEntry>,
}

/// Submit a weather query
pub async fn submit_query(
    State(state): State<AppState>,
    Json(input): Json<QueryInput>,
) -> AppResult<Json<SubmitResponse>> {
    let query = input.into_query(Utc::now().date_naive())?;

    match state.controller.submit(query).await {
        SubmitOutcome::Fetched { snapshot, entry } => Ok(Json(SubmitResponse {
            snapshot,
            ledger_entry: entry,
        })),
        SubmitOutcome::Failed { message } => Err(AppError::WeatherFetchFailed(message.to_string())),
    }
}

/// Current session state
pub async fn get_state(State(state): State<AppState>) -> Json<SessionState> {
    Json(state.controller.state().await)
}

/// Presentation view of the current session state
pub async fn get_page_view(State(state): State<AppState>) -> Json<PageView> {
    Json(page_view(&state.controller.state().await))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn input(location: &str, start: &str, end: &str) -> QueryInput {
        QueryInput {
            location: location.to_string(),
            start_date: date(start),
            end_date: date(end),
            use_case: UseCase::Insurance,
        }
    }

    #[test]
    fn test_valid_input_becomes_query() {
        let query = input("Tulsa, USA", "2024-05-01", "2024-05-03")
            .into_query(date("2024-05-10"))
            .unwrap();
        assert_eq!(query.location, "Tulsa, USA");
        assert_eq!(query.use_case, UseCase::Insurance);
    }

    #[test]
    fn test_blank_location_rejected() {
        for location in ["", "   "] {
            let err = input(location, "2024-05-01", "2024-05-03")
                .into_query(date("2024-05-10"))
                .unwrap_err();
            assert!(matches!(err, AppError::Validation { ref field, .. } if field == "location"));
        }
    }

    #[test]
    fn test_long_location_accepted() {
        let location = "Llanfairpwllgwyngyll, Anglesey, Wales, ".repeat(10);
        let query = input(&location, "2024-05-01", "2024-05-03")
            .into_query(date("2024-05-10"))
            .unwrap();
        assert_eq!(query.location.len(), location.len());
    }

    #[test]
    fn test_inverted_range_rejected_on_start_date() {
        let err = input("Tulsa, USA", "2024-05-04", "2024-05-03")
            .into_query(date("2024-05-10"))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "startDate"));
    }

    #[test]
    fn test_future_end_rejected_on_end_date() {
        let err = input("Tulsa, USA", "2024-05-01", "2024-05-11")
            .into_query(date("2024-05-10"))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "endDate"));
    }

    #[test]
    fn test_use_case_defaults_to_general() {
        let input: QueryInput = serde_json::from_str(
            r#"{"location": "Oslo", "startDate": "2024-05-01", "endDate": "2024-05-01"}"#,
        )
        .unwrap();
        assert_eq!(input.use_case, UseCase::General);
    }
}
