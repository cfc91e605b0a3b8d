use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use super::chat_client::ChatClient;
use super::error::AiError;
use crate::shared::llm::{parse_with_fallback, LlmParseError, LlmResponse};
use crate::shared::prompts::render_summarize_prompt;

/// Longest document prefix sent for summarization, in characters
const MAX_DOCUMENT_CHARS: usize = 48_000;

fn default_true() -> bool {
    true
}

/// AI-generated summary and revision notes for one document
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct DocumentSummary {
    /// One-paragraph overview of the document
    pub summary: String,

    /// Markdown bullet list of key points for revision
    #[serde(alias = "shortNotes")]
    pub short_notes: String,

    #[serde(default = "default_true")]
    #[schemars(skip)]
    pub is_llm_success: bool,

    #[serde(default)]
    #[schemars(skip)]
    pub llm_error_message: Option<String>,
}

impl DocumentSummary {
    pub fn new(summary: impl Into<String>, short_notes: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            short_notes: short_notes.into(),
            is_llm_success: true,
            llm_error_message: None,
        }
    }
}

impl LlmResponse for DocumentSummary {
    fn mark_as_fallback(&mut self, error_message: String) {
        self.is_llm_success = false;
        self.llm_error_message = Some(error_message);
    }

    fn is_success(&self) -> bool {
        self.is_llm_success
    }
}

#[async_trait]
pub trait DocumentSummarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<DocumentSummary, AiError>;
}

pub struct LlmDocumentSummarizer {
    client: ChatClient,
}

impl LlmDocumentSummarizer {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

/// Accepts a parsed reply only if it succeeded and both fields carry text
fn accept(reply: DocumentSummary) -> Result<DocumentSummary, AiError> {
    if !reply.is_success() {
        let reason = reply
            .llm_error_message
            .unwrap_or_else(|| "unparsable reply".to_string());
        return Err(LlmParseError::Unrepairable(reason).into());
    }

    if reply.summary.trim().is_empty() || reply.short_notes.trim().is_empty() {
        return Err(AiError::Parse(
            "Summary reply is missing summary or short notes".to_string(),
        ));
    }

    Ok(DocumentSummary::new(
        reply.summary.trim(),
        reply.short_notes.trim(),
    ))
}

pub(super) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[async_trait]
impl DocumentSummarizer for LlmDocumentSummarizer {
    async fn summarize(&self, text: &str) -> Result<DocumentSummary, AiError> {
        let system = render_summarize_prompt(&DocumentSummary::json_schema_string())?;
        let reply = self
            .client
            .complete(&system, truncate_chars(text, MAX_DOCUMENT_CHARS))
            .await?;

        accept(parse_with_fallback::<DocumentSummary>(&reply))
    }
}
