//! AI collaborators: document summarization and question answering.

mod assistant;
mod chat_client;
mod error;
mod summarizer;
#[cfg(test)]
pub mod testing;

pub use assistant::{DocumentAssistant, LlmDocumentAssistant};
pub use chat_client::ChatClient;
pub use error::AiError;
pub use summarizer::{DocumentSummarizer, DocumentSummary, LlmDocumentSummarizer};
