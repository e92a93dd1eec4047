//! Ledger handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use shared::{
    fingerprint, is_fingerprint, ledger_panel_view, LedgerEntry, LedgerPanelView, WeatherSnapshot,
};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// List all ledger entries in append order
pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<LedgerEntry>> {
    Json(state.controller.ledger().await)
}

/// Get a single ledger entry by block number
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<LedgerEntry>> {
    state
        .controller
        .ledger_entry(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Ledger entry {}", id)))
}

/// Ledger panel view, newest block first
pub async fn get_panel(State(state): State<AppState>) -> Json<LedgerPanelView> {
    let session = state.controller.state().await;
    Json(ledger_panel_view(&session.ledger))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyInput {
    pub record: WeatherSnapshot,
    pub data_hash: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub matches: bool,
    /// Fingerprint recomputed from the submitted record
    pub data_hash: String,
}

/// Recompute a record's fingerprint and compare it with a claimed one
pub async fn verify_entry(Json(input): Json<VerifyInput>) -> AppResult<Json<VerifyResponse>> {
    if !is_fingerprint(&input.data_hash) {
        return Err(AppError::Validation {
            field: "dataHash".to_string(),
            message: "Data hash must be 0x followed by 8 lowercase hex digits".to_string(),
        });
    }

    let data_hash = fingerprint(&input.record);
    Ok(Json(VerifyResponse {
        matches: data_hash == input.data_hash,
        data_hash,
    }))
}
