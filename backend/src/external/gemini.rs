//! Gemini API client
//!
//! Thin client for the `generateContent` REST endpoint, implementing
//! [`GenerativeModel`]. No timeout or retry is applied to requests.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GeminiConfig;
use crate::external::model::{FunctionDeclaration, GenerativeModel, ModelError};

/// Client for the Gemini generative model service
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool<'a> {
    function_declarations: Vec<&'a FunctionDeclaration>,
}

/// Response from `generateContent`
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    pub text: Option<String>,
    pub function_call: Option<FunctionCall>,
    /// Reasoning summaries are not part of the answer text
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub args: Option<Value>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[ResponsePart] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Function calls of the first candidate, in order
    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        self.first_parts()
            .iter()
            .filter_map(|p| p.function_call.as_ref())
            .collect()
    }

    /// Concatenated answer text of the first candidate
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, crate::config::DEFAULT_GEMINI_BASE_URL.to_string(), model)
    }

    /// Create a new Gemini client with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        Self {
            http_client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::with_base_url(
            config.api_key.clone(),
            config.base_url.clone(),
            config.model.clone(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, ModelError> {
        if self.api_key.trim().is_empty() {
            return Err(ModelError::MissingApiKey);
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))
    }
}

fn user_prompt(prompt: &str) -> Vec<Content<'_>> {
    vec![Content {
        role: "user",
        parts: vec![TextPart { text: prompt }],
    }]
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_structured(
        &self,
        prompt: &str,
        declaration: &FunctionDeclaration,
    ) -> Result<Option<Value>, ModelError> {
        let request = GenerateContentRequest {
            contents: user_prompt(prompt),
            tools: vec![Tool {
                function_declarations: vec![declaration],
            }],
        };

        let response = self.generate_content(&request).await?;
        let calls = response.function_calls();
        tracing::debug!(
            model = %self.model,
            function_calls = calls.len(),
            "Structured generation finished"
        );

        Ok(calls
            .first()
            .map(|call| call.args.clone().unwrap_or(Value::Null)))
    }

    async fn generate_text(&self, prompt: &str) -> Result<Option<String>, ModelError> {
        let request = GenerateContentRequest {
            contents: user_prompt(prompt),
            tools: Vec::new(),
        };

        let response = self.generate_content(&request).await?;
        Ok(response.text())
    }
}
