//! Ledger controller
//!
//! Owns the session state (current snapshot, ledger, loading flag, error
//! message) and runs the submit transition:
//! - reset: loading on, error and snapshot cleared
//! - fetch through the [`WeatherOracle`]
//! - success: store the snapshot, append a ledger entry for critical use cases
//! - failure: log, store the fixed user-facing message
//! - loading off
//!
//! Concurrent submissions are not coordinated. Each one runs to completion
//! and the later-resolving call's update wins; the first call to finish also
//! clears the loading flag while others may still be pending.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use shared::{LedgerEntry, SessionState, WeatherQuery, WeatherSnapshot};

use crate::services::oracle::WeatherOracle;

/// The only error text users ever see for a failed fetch
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data. The AI model may be unable to generate data for the requested location or date range. Please try again.";

/// Result of one submit transition
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Fetched {
        snapshot: WeatherSnapshot,
        /// Present when the use case was critical
        entry: Option<LedgerEntry>,
    },
    Failed {
        message: &'static str,
    },
}

/// Session controller shared by all handlers
#[derive(Clone)]
pub struct LedgerController {
    oracle: WeatherOracle,
    state: Arc<RwLock<SessionState>>,
    submissions: Arc<AtomicU64>,
}

impl LedgerController {
    pub fn new(oracle: WeatherOracle) -> Self {
        Self {
            oracle,
            state: Arc::new(RwLock::new(SessionState::new())),
            submissions: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run the submit transition for `query`
    pub async fn submit(&self, query: WeatherQuery) -> SubmitOutcome {
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error_message = None;
            state.snapshot = None;
        }

        let submission = self.submissions.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            submission,
            location = %query.location,
            use_case = %query.use_case,
            start_date = %query.start_date,
            end_date = %query.end_date,
            "Fetching weather data"
        );

        let result = self
            .oracle
            .fetch_weather_data_and_insights(&query.location, query.start_date, query.end_date)
            .await;

        let mut state = self.state.write().await;
        let outcome = match result {
            Ok(snapshot) => {
                let entry = if query.use_case.is_critical() {
                    let entry = state
                        .ledger
                        .append(Utc::now(), &query.location, query.use_case, &snapshot)
                        .clone();
                    tracing::info!(
                        submission,
                        block = entry.id,
                        data_hash = %entry.data_hash,
                        "Logged weather data to ledger"
                    );
                    Some(entry)
                } else {
                    None
                };
                state.snapshot = Some(snapshot.clone());
                SubmitOutcome::Fetched { snapshot, entry }
            }
            Err(e) => {
                tracing::error!(submission, error = %e, "Weather fetch failed");
                state.error_message = Some(FETCH_FAILED_MESSAGE.to_string());
                SubmitOutcome::Failed {
                    message: FETCH_FAILED_MESSAGE,
                }
            }
        };
        state.is_loading = false;

        outcome
    }

    /// Copy of all observable slots
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Ledger entries in append order
    pub async fn ledger(&self) -> Vec<LedgerEntry> {
        self.state.read().await.ledger.entries().to_vec()
    }

    pub async fn ledger_entry(&self, id: u64) -> Option<LedgerEntry> {
        self.state.read().await.ledger.get(id).cloned()
    }

    /// Number of submissions started so far
    pub fn submissions(&self) -> u64 {
        self.submissions.load(Ordering::Relaxed)
    }
}
