//! View models for the presentation layer
//!
//! Pure functions from [`SessionState`] to display-ready values. Rendering
//! itself (layout, chart drawing, icons) belongs to the browser.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::{
    CurrentConditions, DailyRecord, Ledger, LedgerEntry, LocationInfo, SessionState, UseCase,
    WeatherSnapshot,
};
use crate::types::WeatherQuery;

pub const DEFAULT_LOCATION: &str = "New York, USA";
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;
pub const USE_CASE_HINT: &str = "Selecting a critical use case will log the data to the blockchain.";
pub const SUBMIT_LABEL: &str = "Get Weather & Verify";
pub const SUBMIT_LABEL_LOADING: &str = "Fetching Data...";
pub const EMPTY_LEDGER_MESSAGE: &str = "No critical data has been logged to the blockchain yet.";
pub const LOADING_MESSAGE: &str = "Generating secure weather data with AI...";
pub const WELCOME_TITLE: &str = "Welcome to the Weather Ledger";
pub const WELCOME_MESSAGE: &str = "Enter a location and date range to fetch and verify weather data on our secure, simulated blockchain.";

// ============================================================================
// Form
// ============================================================================

/// Initial form values for `today`
pub fn form_defaults(today: NaiveDate) -> WeatherQuery {
    WeatherQuery::new(
        DEFAULT_LOCATION,
        today - Duration::days(DEFAULT_LOOKBACK_DAYS),
        today,
        UseCase::General,
    )
}

/// Form state for rendering
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub values: WeatherQuery,
    pub use_case_options: Vec<&'static str>,
    pub use_case_hint: &'static str,
    /// Start date may not pass the chosen end date
    pub start_date_max: NaiveDate,
    pub end_date_min: NaiveDate,
    pub end_date_max: NaiveDate,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
}

pub fn form_view(values: WeatherQuery, today: NaiveDate, is_loading: bool) -> FormView {
    FormView {
        start_date_max: values.end_date,
        end_date_min: values.start_date,
        end_date_max: today,
        values,
        use_case_options: UseCase::ALL.iter().map(UseCase::label).collect(),
        use_case_hint: USE_CASE_HINT,
        submit_label: submit_label(is_loading),
        submit_disabled: is_loading,
    }
}

pub fn submit_label(is_loading: bool) -> &'static str {
    if is_loading {
        SUBMIT_LABEL_LOADING
    } else {
        SUBMIT_LABEL
    }
}

// ============================================================================
// Current conditions
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricView {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditionsView {
    pub heading: String,
    pub as_of: String,
    pub temperature: String,
    pub condition: String,
    pub icon: String,
    pub metrics: Vec<MetricView>,
}

pub fn current_conditions_view(
    location: &LocationInfo,
    current: &CurrentConditions,
) -> CurrentConditionsView {
    CurrentConditionsView {
        heading: format!("{}, {}", location.name, location.country),
        as_of: format!("As of {}", clock_time(&current.last_updated)),
        temperature: format!("{}°C", round_half_up(current.temp_c)),
        condition: current.condition.text.clone(),
        icon: current.condition.icon.clone(),
        metrics: vec![
            MetricView {
                label: "Humidity",
                value: current.humidity.to_string(),
                unit: "%",
            },
            MetricView {
                label: "Wind Speed",
                value: current.wind_kph.to_string(),
                unit: "kph",
            },
            MetricView {
                label: "Pressure",
                value: current.pressure_mb.to_string(),
                unit: "mb",
            },
        ],
    }
}

// ============================================================================
// Historical chart and table
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSeries {
    pub name: &'static str,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableRow {
    pub date: String,
    pub avg_temp_c: String,
    pub max_wind_kph: String,
    pub total_precip_mm: String,
    pub avg_humidity: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoricalView {
    pub insights: String,
    pub chart: ChartSeries,
    pub columns: [&'static str; 5],
    pub rows: Vec<TableRow>,
}

pub fn historical_view(historical: &[DailyRecord], insights: &str) -> HistoricalView {
    HistoricalView {
        insights: insights.to_string(),
        chart: ChartSeries {
            name: "Avg Temp",
            points: historical
                .iter()
                .map(|day| ChartPoint {
                    label: chart_label(&day.date),
                    value: day.avg_temp_c,
                })
                .collect(),
        },
        columns: [
            "Date",
            "Avg Temp (°C)",
            "Max Wind (kph)",
            "Precip (mm)",
            "Avg Humidity (%)",
        ],
        rows: historical
            .iter()
            .map(|day| TableRow {
                date: table_date(&day.date),
                avg_temp_c: format!("{:.1}", day.avg_temp_c),
                max_wind_kph: format!("{:.1}", day.max_wind_kph),
                total_precip_mm: format!("{:.1}", day.total_precip_mm),
                avg_humidity: format!("{:.0}", day.avg_humidity),
            })
            .collect(),
    }
}

// ============================================================================
// Ledger panel
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerBlockView {
    pub id: u64,
    pub title: String,
    pub subject: String,
    pub readings: String,
    pub hash: String,
    pub recorded_at: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerPanelView {
    /// Newest first
    pub blocks: Vec<LedgerBlockView>,
    pub empty_message: Option<&'static str>,
}

pub fn ledger_block_view(entry: &LedgerEntry) -> LedgerBlockView {
    LedgerBlockView {
        id: entry.id,
        title: format!("Block #{}", entry.id),
        subject: format!("{} @ {}", entry.use_case, entry.location),
        readings: format!(
            "Temp: {}°C | Humidity: {}%",
            entry.temperature, entry.humidity
        ),
        hash: format!("Hash: {}", entry.data_hash),
        recorded_at: entry.timestamp.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
    }
}

pub fn ledger_panel_view(ledger: &Ledger) -> LedgerPanelView {
    LedgerPanelView {
        blocks: ledger.entries().iter().rev().map(ledger_block_view).collect(),
        empty_message: ledger.is_empty().then_some(EMPTY_LEDGER_MESSAGE),
    }
}

// ============================================================================
// Whole page
// ============================================================================

/// The main pane shows exactly one of these
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MainPane {
    Loading {
        message: &'static str,
    },
    Error {
        message: String,
    },
    Results {
        current: CurrentConditionsView,
        historical: HistoricalView,
    },
    Welcome {
        title: &'static str,
        message: &'static str,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub main: MainPane,
    pub ledger: LedgerPanelView,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
}

pub fn results_pane(snapshot: &WeatherSnapshot) -> MainPane {
    MainPane::Results {
        current: current_conditions_view(&snapshot.location, &snapshot.current),
        historical: historical_view(&snapshot.historical, &snapshot.insights),
    }
}

pub fn page_view(state: &SessionState) -> PageView {
    let main = if state.is_loading {
        MainPane::Loading {
            message: LOADING_MESSAGE,
        }
    } else if let Some(message) = &state.error_message {
        MainPane::Error {
            message: message.clone(),
        }
    } else if let Some(snapshot) = &state.snapshot {
        results_pane(snapshot)
    } else {
        MainPane::Welcome {
            title: WELCOME_TITLE,
            message: WELCOME_MESSAGE,
        }
    };

    PageView {
        main,
        ledger: ledger_panel_view(&state.ledger),
        submit_label: submit_label(state.is_loading),
        submit_disabled: state.is_loading,
    }
}

// ============================================================================
// Formatting helpers
// ============================================================================

/// Round half towards positive infinity, as browsers do
fn round_half_up(value: f64) -> f64 {
    let rounded = (value + 0.5).floor();
    // Avoid rendering "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn chart_label(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%b %-d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn table_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn clock_time(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M")
        .map(|t| t.format("%-I:%M:%S %p").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
