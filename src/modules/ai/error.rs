use thiserror::Error;

use crate::shared::llm::LlmParseError;
use crate::shared::prompts::TemplateError;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx reply from the completion endpoint
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error(transparent)]
    UnusableOutput(#[from] LlmParseError),

    #[error(transparent)]
    Prompt(#[from] TemplateError),
}
