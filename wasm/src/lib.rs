//! WebAssembly module for the Weather Ledger
//!
//! Provides client-side computation for:
//! - Integrity fingerprints and their verification
//! - Use case classification
//! - Form defaults and validation
//! - Page, ledger panel and chart view models
//!
//! Records cross the boundary as JSON strings.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{
    fingerprint, fingerprint_str, form_defaults, form_view, historical_view, ledger_panel_view,
    page_view, verify,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("weather-ledger-wasm loaded"));
}

fn to_js(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn parse<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn render<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

/// Today's date in the browser's local time zone
fn local_today() -> Result<NaiveDate, String> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .ok_or_else(|| "Browser returned an invalid date".to_string())
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date {:?}: {}", value, e))
}

// ============================================================================
// Fingerprints
// ============================================================================

fn snapshot_fingerprint(record_json: &str) -> Result<String, String> {
    let snapshot: WeatherSnapshot = parse(record_json, "weather record")?;
    Ok(fingerprint(&snapshot))
}

fn snapshot_matches(record_json: &str, expected: &str) -> Result<bool, String> {
    let snapshot: WeatherSnapshot = parse(record_json, "weather record")?;
    Ok(verify(&snapshot, expected))
}

/// Fingerprint a weather record given as JSON
#[wasm_bindgen]
pub fn compute_fingerprint(record_json: &str) -> Result<String, JsValue> {
    snapshot_fingerprint(record_json).map_err(to_js)
}

/// Fingerprint arbitrary text
#[wasm_bindgen]
pub fn fingerprint_text(text: &str) -> String {
    fingerprint_str(text)
}

/// Check a weather record against a ledger block's hash
#[wasm_bindgen]
pub fn verify_fingerprint(record_json: &str, expected: &str) -> Result<bool, JsValue> {
    let matches = snapshot_matches(record_json, expected).map_err(to_js)?;
    if !matches {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Weather record does not match {}",
            expected
        )));
    }
    Ok(matches)
}

// ============================================================================
// Use cases
// ============================================================================

/// Whether results for this use case label are logged to the ledger
#[wasm_bindgen]
pub fn is_critical_use_case(label: &str) -> bool {
    label
        .parse::<UseCase>()
        .map(|use_case| use_case.is_critical())
        .unwrap_or(false)
}

/// All use case labels in menu order, as a JSON array
#[wasm_bindgen]
pub fn use_case_labels() -> String {
    let labels: Vec<&str> = UseCase::ALL.iter().map(UseCase::label).collect();
    serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string())
}

// ============================================================================
// Form
// ============================================================================

fn form_json(today: NaiveDate, is_loading: bool) -> Result<String, String> {
    render(&form_view(form_defaults(today), today, is_loading))
}

fn query_error(query_json: &str, today: NaiveDate) -> Result<Option<String>, String> {
    let query: WeatherQuery = parse(query_json, "query")?;
    Ok(validate_query(&query, today).err().map(str::to_string))
}

/// Initial form state for today's date
#[wasm_bindgen]
pub fn default_form(is_loading: bool) -> Result<String, JsValue> {
    let today = local_today().map_err(to_js)?;
    form_json(today, is_loading).map_err(to_js)
}

/// Validate a query; returns the first violated constraint, if any.
///
/// `today` is `YYYY-MM-DD`; pass an empty string to use the browser's date.
#[wasm_bindgen]
pub fn validate_query_json(query_json: &str, today: &str) -> Result<Option<String>, JsValue> {
    let today = if today.is_empty() {
        local_today()
    } else {
        parse_day(today)
    }
    .map_err(to_js)?;

    query_error(query_json, today).map_err(to_js)
}

// ============================================================================
// Views
// ============================================================================

fn page_json(state_json: &str) -> Result<String, String> {
    let state: SessionState = parse(state_json, "session state")?;
    render(&page_view(&state))
}

fn panel_json(ledger_json: &str) -> Result<String, String> {
    let ledger: Ledger = parse(ledger_json, "ledger")?;
    render(&ledger_panel_view(&ledger))
}

fn chart_json(record_json: &str) -> Result<String, String> {
    let snapshot: WeatherSnapshot = parse(record_json, "weather record")?;
    render(&historical_view(&snapshot.historical, &snapshot.insights))
}

/// Whole-page view model for a session state
#[wasm_bindgen]
pub fn page_view_json(state_json: &str) -> Result<String, JsValue> {
    page_json(state_json).map_err(to_js)
}

/// Ledger panel, newest block first
#[wasm_bindgen]
pub fn ledger_panel_json(ledger_json: &str) -> Result<String, JsValue> {
    panel_json(ledger_json).map_err(to_js)
}

/// Chart series, table rows and insights for a weather record
#[wasm_bindgen]
pub fn historical_view_json(record_json: &str) -> Result<String, JsValue> {
    chart_json(record_json).map_err(to_js)
}
