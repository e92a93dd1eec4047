//! Validation utilities for weather queries
//!
//! These mirror the constraints of the input form: a location is required,
//! the start date may not follow the end date, and the end date may not be in
//! the future. The controller itself does not re-check them.

use chrono::NaiveDate;

use crate::types::WeatherQuery;

/// Validate that a location was entered
pub fn validate_location(location: &str) -> Result<(), &'static str> {
    if location.trim().is_empty() {
        return Err("Location is required");
    }
    Ok(())
}

/// Validate `start <= end <= today`
pub fn validate_date_range(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<(), &'static str> {
    if start > end {
        return Err("Start date must not be after end date");
    }
    if end > today {
        return Err("End date must not be in the future");
    }
    Ok(())
}

/// Validate a full query against `today`
pub fn validate_query(query: &WeatherQuery, today: NaiveDate) -> Result<(), &'static str> {
    validate_location(&query.location)?;
    validate_date_range(query.start_date, query.end_date, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UseCase;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_validate_location() {
        assert!(validate_location("Tulsa, USA").is_ok());
        assert!(validate_location("").is_err());
        assert!(validate_location("   ").is_err());
    }

    #[test]
    fn test_validate_date_range_valid() {
        let today = date("2024-05-10");
        assert!(validate_date_range(date("2024-05-01"), date("2024-05-03"), today).is_ok());
        // Same day on all three bounds
        assert!(validate_date_range(today, today, today).is_ok());
    }

    #[test]
    fn test_validate_date_range_inverted() {
        let today = date("2024-05-10");
        assert_eq!(
            validate_date_range(date("2024-05-04"), date("2024-05-03"), today),
            Err("Start date must not be after end date")
        );
    }

    #[test]
    fn test_validate_date_range_future_end() {
        let today = date("2024-05-10");
        assert_eq!(
            validate_date_range(date("2024-05-01"), date("2024-05-11"), today),
            Err("End date must not be in the future")
        );
    }

    #[test]
    fn test_validate_query() {
        let today = date("2024-05-10");
        let mut query = WeatherQuery::new(
            "Tulsa, USA",
            date("2024-05-01"),
            date("2024-05-03"),
            UseCase::Agriculture,
        );
        assert!(validate_query(&query, today).is_ok());

        query.location = String::new();
        assert_eq!(validate_query(&query, today), Err("Location is required"));
    }
}
