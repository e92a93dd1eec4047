//! Weather oracle
//!
//! Synthesizes weather data with a generative model in two sequential steps:
//! 1. Structured generation against the `get_weather_data_for_location`
//!    function schema (location, current conditions, daily history)
//! 2. A free-text insight paragraph seeded with the data from step 1
//!
//! The operation is all-or-nothing. A failure in step 1 skips step 2, and a
//! failure in step 2 discards the step 1 data. Nothing is retried.

use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;

use shared::{WeatherPayload, WeatherSnapshot};

use crate::external::{FunctionDeclaration, GenerativeModel, ModelError};

/// Name of the function the model is asked to call
pub const WEATHER_FUNCTION_NAME: &str = "get_weather_data_for_location";

/// Top-level keys the structured payload must carry
const REQUIRED_KEYS: [&str; 3] = ["location", "current", "historical"];

/// Oracle failures
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("AI model did not return the expected weather data structure")]
    NoStructuredResponse,

    #[error("Received incomplete weather data from the AI model")]
    IncompleteWeatherData,

    #[error("Received malformed weather data from the AI model: {0}")]
    MalformedWeatherData(String),

    #[error("AI model failed to generate weather insights")]
    NoInsightText,

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Weather oracle backed by a generative model
#[derive(Clone)]
pub struct WeatherOracle {
    model: Arc<dyn GenerativeModel>,
    declaration: FunctionDeclaration,
}

impl WeatherOracle {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model,
            declaration: weather_function_declaration(),
        }
    }

    /// Generate a complete snapshot for `location` over `[start_date, end_date]`
    pub async fn fetch_weather_data_and_insights(
        &self,
        location: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<WeatherSnapshot, OracleError> {
        let prompt = data_generation_prompt(location, start_date, end_date);
        tracing::debug!(%location, %start_date, %end_date, "Requesting structured weather data");

        let args = self
            .model
            .generate_structured(&prompt, &self.declaration)
            .await?
            .ok_or(OracleError::NoStructuredResponse)?;

        let payload = decode_payload(&args)?;
        tracing::debug!(days = payload.historical.len(), "Structured weather data received");

        let insights = self
            .model
            .generate_text(&insights_prompt(location, &args))
            .await?
            .filter(|text| !text.trim().is_empty())
            .ok_or(OracleError::NoInsightText)?;

        Ok(payload.with_insights(insights))
    }
}

/// Check presence of the required sections, then decode the typed payload
pub fn decode_payload(args: &Value) -> Result<WeatherPayload, OracleError> {
    let complete = REQUIRED_KEYS
        .iter()
        .all(|key| args.get(key).is_some_and(|v| !v.is_null()));
    if !complete {
        return Err(OracleError::IncompleteWeatherData);
    }

    serde_json::from_value(args.clone())
        .map_err(|e| OracleError::MalformedWeatherData(e.to_string()))
}

pub fn data_generation_prompt(location: &str, start_date: NaiveDate, end_date: NaiveDate) -> String {
    format!(
        "Generate weather data for {location} from {start_date} to {end_date}. \
         The current weather should reflect the end date. \
         Ensure the historical data covers each day in the range."
    )
}

pub fn insights_prompt(location: &str, data: &Value) -> String {
    let data = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    format!(
        "Based on the following weather data for {location}, provide a brief, one-paragraph \
         summary for a user in a critical industry like agriculture or insurance. Highlight the \
         max/min/average temperature from the historical data, mention any significant \
         precipitation, and note any potential extreme weather events hinted at by the data \
         (e.g., high winds, sudden temperature drops). Keep it concise.\n\nData:\n{data}"
    )
}

/// Schema the model fills in during step 1
pub fn weather_function_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: WEATHER_FUNCTION_NAME.to_string(),
        description: "Generates detailed current and historical weather data for a specified location and date range.".to_string(),
        parameters: json!({
            "type": "OBJECT",
            "properties": {
                "location": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "City name." },
                        "region": { "type": "STRING", "description": "State or region." },
                        "country": { "type": "STRING", "description": "Country name." },
                        "localtime": { "type": "STRING", "description": "Current local time in YYYY-MM-DD HH:mm format." }
                    }
                },
                "current": {
                    "type": "OBJECT",
                    "properties": {
                        "last_updated": { "type": "STRING", "description": "Last update time in YYYY-MM-DD HH:mm format." },
                        "temp_c": { "type": "NUMBER", "description": "Temperature in Celsius." },
                        "condition": {
                            "type": "OBJECT",
                            "properties": {
                                "text": { "type": "STRING", "description": "Weather condition text, e.g., \"Sunny\", \"Partly cloudy\"." },
                                "icon": { "type": "STRING", "description": "A URL to a weather icon. Ignore this and use a placeholder." }
                            }
                        },
                        "wind_kph": { "type": "NUMBER", "description": "Wind speed in kilometers per hour." },
                        "pressure_mb": { "type": "NUMBER", "description": "Pressure in millibars." },
                        "humidity": { "type": "NUMBER", "description": "Humidity percentage." }
                    }
                },
                "historical": {
                    "type": "ARRAY",
                    "description": "An array of historical daily weather data for the specified date range.",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "date": { "type": "STRING", "description": "Date in YYYY-MM-DD format." },
                            "avg_temp_c": { "type": "NUMBER", "description": "Average temperature in Celsius for the day." },
                            "max_wind_kph": { "type": "NUMBER", "description": "Maximum wind speed in kilometers per hour for the day." },
                            "total_precip_mm": { "type": "NUMBER", "description": "Total precipitation in millimeters for the day." },
                            "avg_humidity": { "type": "NUMBER", "description": "Average humidity percentage for the day." }
                        }
                    }
                }
            },
            "required": REQUIRED_KEYS
        }),
    }
}
