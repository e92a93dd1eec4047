//! External API integrations

pub mod gemini;
pub mod model;

pub use gemini::GeminiClient;
pub use model::{FunctionDeclaration, GenerativeModel, ModelError};
