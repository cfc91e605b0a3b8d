//! Scripted AI collaborators for tests.
//!
//! Deterministic stand-ins that never touch the network and record every call
//! for assertions.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::{AiError, DocumentAssistant, DocumentSummarizer, DocumentSummary};

/// What the scripted summarizer does on a call
#[derive(Debug, Clone)]
pub enum SummarizerStep {
    Succeed { summary: String, short_notes: String },
    Fail(String),
    /// Sleeps before succeeding; used to trip the enrichment deadline
    Stall(Duration),
}

impl SummarizerStep {
    pub fn succeed(summary: &str, short_notes: &str) -> Self {
        Self::Succeed {
            summary: summary.to_string(),
            short_notes: short_notes.to_string(),
        }
    }
}

/// Plays queued steps in order, then repeats the fallback step
pub struct ScriptedSummarizer {
    steps: Mutex<VecDeque<SummarizerStep>>,
    fallback: SummarizerStep,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSummarizer {
    pub fn always(step: SummarizerStep) -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            fallback: step,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, step: SummarizerStep) -> Self {
        self.steps.lock().unwrap().push_back(step);
        self
    }

    /// Texts passed to `summarize`, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentSummarizer for ScriptedSummarizer {
    async fn summarize(&self, text: &str) -> Result<DocumentSummary, AiError> {
        self.calls.lock().unwrap().push(text.to_string());
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match step {
            SummarizerStep::Succeed {
                summary,
                short_notes,
            } => Ok(DocumentSummary::new(summary, short_notes)),
            SummarizerStep::Fail(message) => Err(AiError::Api {
                status: 503,
                message,
            }),
            SummarizerStep::Stall(duration) => {
                tokio::time::sleep(duration).await;
                Ok(DocumentSummary::new("late summary", "late notes"))
            }
        }
    }
}

/// Answers every question with a fixed reply, or fails when built with `failing`
pub struct ScriptedAssistant {
    reply: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedAssistant {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(document_text, question)` pairs, in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentAssistant for ScriptedAssistant {
    async fn answer(&self, document_text: &str, question: &str) -> Result<String, AiError> {
        self.calls
            .lock()
            .unwrap()
            .push((document_text.to_string(), question.to_string()));

        self.reply
            .clone()
            .ok_or_else(|| AiError::Network("connection reset".to_string()))
    }
}
