//! Generative model capability
//!
//! The oracle only needs two things from a model provider: schema-constrained
//! generation that returns the arguments of the first function call, and plain
//! text generation.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A function the model may "call" by filling in its parameter schema
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    /// Parameter schema in the provider's schema dialect
    pub parameters: Value,
}

/// Transport-level failures talking to the model service
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model API key is not configured")]
    MissingApiKey,

    #[error("Model request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode model response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Ask the model to populate `declaration`'s schema.
    ///
    /// Returns the arguments of the first function call, or `None` when the
    /// model answered without calling it.
    async fn generate_structured(
        &self,
        prompt: &str,
        declaration: &FunctionDeclaration,
    ) -> Result<Option<Value>, ModelError>;

    /// Plain text generation. `None` when the response holds no text.
    async fn generate_text(&self, prompt: &str) -> Result<Option<String>, ModelError>;
}
