use async_trait::async_trait;

use super::chat_client::ChatClient;
use super::error::AiError;
use super::summarizer::truncate_chars;
use crate::shared::prompts::render_answer_prompt;

const MAX_CONTEXT_CHARS: usize = 48_000;

/// Stateless one-shot question answering over a single document
#[async_trait]
pub trait DocumentAssistant: Send + Sync {
    async fn answer(&self, document_text: &str, question: &str) -> Result<String, AiError>;
}

pub struct LlmDocumentAssistant {
    client: ChatClient,
}

impl LlmDocumentAssistant {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentAssistant for LlmDocumentAssistant {
    async fn answer(&self, document_text: &str, question: &str) -> Result<String, AiError> {
        let system = render_answer_prompt(truncate_chars(document_text, MAX_CONTEXT_CHARS))?;
        let answer = self.client.complete(&system, question).await?;
        Ok(answer.trim().to_string())
    }
}
