//! Test doubles shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use weather_ledger_backend::external::{FunctionDeclaration, GenerativeModel, ModelError};
use weather_ledger_backend::services::{LedgerController, WeatherOracle};

pub const INSIGHT: &str = "Mild and mostly dry with a breezy afternoon on the 2nd.";

/// A structured payload the model might plausibly return
pub fn sample_args(location: &str) -> Value {
    json!({
        "location": {
            "name": location,
            "region": "Oklahoma",
            "country": "USA",
            "localtime": "2024-05-03 14:00"
        },
        "current": {
            "last_updated": "2024-05-03 13:45",
            "temp_c": 21.4,
            "condition": {"text": "Partly cloudy", "icon": "placeholder"},
            "wind_kph": 14.8,
            "pressure_mb": 1012.5,
            "humidity": 58.0
        },
        "historical": [
            {"date": "2024-05-01", "avg_temp_c": 19.2, "max_wind_kph": 22.3, "total_precip_mm": 0.0, "avg_humidity": 61.0},
            {"date": "2024-05-02", "avg_temp_c": 17.6, "max_wind_kph": 41.0, "total_precip_mm": 12.4, "avg_humidity": 78.0},
            {"date": "2024-05-03", "avg_temp_c": 21.0, "max_wind_kph": 18.5, "total_precip_mm": 0.3, "avg_humidity": 57.0}
        ]
    })
}

/// Holds a model call until the test releases it
pub struct Gate {
    entered: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Test-side handles of a [`Gate`]
pub struct GateHandle {
    pub entered: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

pub fn gate() -> (Gate, GateHandle) {
    let (entered_tx, entered_rx) = oneshot::channel();
    let (release_tx, release_rx) = oneshot::channel();
    (
        Gate {
            entered: entered_tx,
            release: release_rx,
        },
        GateHandle {
            entered: entered_rx,
            release: release_tx,
        },
    )
}

/// Scripted model: queued responses are served first, then healthy defaults
#[derive(Default)]
pub struct FakeModel {
    structured: Mutex<VecDeque<Result<Option<Value>, ModelError>>>,
    text: Mutex<VecDeque<Result<Option<String>, ModelError>>>,
    gate: Mutex<Option<Gate>>,
    structured_prompts: Mutex<Vec<String>>,
    text_prompts: Mutex<Vec<String>>,
    structured_calls: AtomicUsize,
    text_calls: AtomicUsize,
}

impl FakeModel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_structured(&self, response: Result<Option<Value>, ModelError>) {
        self.structured.lock().unwrap().push_back(response);
    }

    pub fn push_text(&self, response: Result<Option<String>, ModelError>) {
        self.text.lock().unwrap().push_back(response);
    }

    /// Block the next structured call until released
    pub fn hold_next(&self) -> GateHandle {
        let (gate, handle) = gate();
        *self.gate.lock().unwrap() = Some(gate);
        handle
    }

    pub fn structured_calls(&self) -> usize {
        self.structured_calls.load(Ordering::SeqCst)
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn structured_prompts(&self) -> Vec<String> {
        self.structured_prompts.lock().unwrap().clone()
    }

    pub fn text_prompts(&self) -> Vec<String> {
        self.text_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn generate_structured(
        &self,
        prompt: &str,
        _declaration: &FunctionDeclaration,
    ) -> Result<Option<Value>, ModelError> {
        self.structured_calls.fetch_add(1, Ordering::SeqCst);
        self.structured_prompts.lock().unwrap().push(prompt.to_string());

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.entered.send(());
            let _ = gate.release.await;
        }

        let scripted = self.structured.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(Some(sample_args("Tulsa"))))
    }

    async fn generate_text(&self, prompt: &str) -> Result<Option<String>, ModelError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.text_prompts.lock().unwrap().push(prompt.to_string());

        let scripted = self.text.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(Some(INSIGHT.to_string())))
    }
}

pub fn controller(model: Arc<FakeModel>) -> LedgerController {
    LedgerController::new(WeatherOracle::new(model))
}
