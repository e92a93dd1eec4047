//! Route definitions for the Weather Ledger API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/weather", weather_routes())
        .nest("/ledger", ledger_routes())
        // Whole-page presentation view
        .route("/view", get(handlers::get_page_view))
}

/// Weather query routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/query", post(handlers::submit_query))
        .route("/state", get(handlers::get_state))
}

/// Ledger routes
fn ledger_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_entries))
        .route("/panel", get(handlers::get_panel))
        .route("/verify", post(handlers::verify_entry))
        .route("/:id", get(handlers::get_entry))
}
