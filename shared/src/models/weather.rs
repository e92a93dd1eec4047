//! Weather data models
//!
//! Field names follow the wire shape requested from the generative model, so a
//! payload can be decoded directly and serialized back unchanged.

use serde::{Deserialize, Serialize};

/// Where the weather data applies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationInfo {
    pub name: String,
    pub region: String,
    pub country: String,
    /// Local time, `YYYY-MM-DD HH:mm`
    pub localtime: String,
}

/// Condition description and icon reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    pub text: String,
    #[serde(default)]
    pub icon: String,
}

/// Current conditions, reflecting the end of the requested range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    /// `YYYY-MM-DD HH:mm`
    pub last_updated: String,
    pub temp_c: f64,
    pub condition: Condition,
    pub wind_kph: f64,
    pub pressure_mb: f64,
    pub humidity: f64,
}

/// One day of historical weather
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRecord {
    /// `YYYY-MM-DD`
    pub date: String,
    pub avg_temp_c: f64,
    pub max_wind_kph: f64,
    pub total_precip_mm: f64,
    pub avg_humidity: f64,
}

/// Structured data produced by the first generation step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherPayload {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    pub historical: Vec<DailyRecord>,
}

impl WeatherPayload {
    /// Attach the insight paragraph, producing the complete snapshot
    pub fn with_insights(self, insights: impl Into<String>) -> WeatherSnapshot {
        WeatherSnapshot {
            location: self.location,
            current: self.current,
            historical: self.historical,
            insights: insights.into(),
        }
    }
}

/// Complete result of one weather query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    pub historical: Vec<DailyRecord>,
    pub insights: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, temp: f64, precip: f64) -> DailyRecord {
        DailyRecord {
            date: date.to_string(),
            avg_temp_c: temp,
            max_wind_kph: 10.0,
            total_precip_mm: precip,
            avg_humidity: 60.0,
        }
    }

    #[test]
    fn test_payload_decodes_without_icon() {
        let json = r#"{
            "location": {"name": "Tulsa", "region": "Oklahoma", "country": "USA", "localtime": "2024-05-03 14:00"},
            "current": {
                "last_updated": "2024-05-03 13:45",
                "temp_c": 21.4,
                "condition": {"text": "Sunny"},
                "wind_kph": 12.2,
                "pressure_mb": 1015,
                "humidity": 55
            },
            "historical": []
        }"#;
        let payload: WeatherPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.current.condition.icon, "");
        assert_eq!(payload.current.humidity, 55.0);
        assert!(payload.historical.is_empty());
    }

    #[test]
    fn test_with_insights_keeps_payload() {
        let payload = WeatherPayload {
            location: LocationInfo {
                name: "Tulsa".to_string(),
                region: "Oklahoma".to_string(),
                country: "USA".to_string(),
                localtime: "2024-05-03 14:00".to_string(),
            },
            current: CurrentConditions {
                last_updated: "2024-05-03 13:45".to_string(),
                temp_c: 21.4,
                condition: Condition {
                    text: "Sunny".to_string(),
                    icon: String::new(),
                },
                wind_kph: 12.2,
                pressure_mb: 1015.0,
                humidity: 55.0,
            },
            historical: vec![
                day("2024-05-01", 18.0, 0.0),
                day("2024-05-02", 22.5, 4.2),
                day("2024-05-03", 20.1, 1.3),
            ],
        };

        let snapshot = payload.clone().with_insights("Mild and dry.");
        assert_eq!(snapshot.location, payload.location);
        assert_eq!(snapshot.historical.len(), 3);
        assert_eq!(snapshot.insights, "Mild and dry.");
        assert_eq!(snapshot.historical[1].avg_temp_c, 22.5);
    }
}
