use std::sync::Arc;
use uuid::Uuid;

use super::ResourceQueryService;
use crate::core::error::{AppError, Result};
use crate::features::users::models::User;
use crate::modules::ai::DocumentAssistant;
use crate::shared::constants::{ASSISTANT_FAILURE_MESSAGE, MAX_QUESTION_LENGTH};

/// One-shot questions about a single approved resource
pub struct AssistantService {
    queries: Arc<ResourceQueryService>,
    assistant: Arc<dyn DocumentAssistant>,
}

impl AssistantService {
    pub fn new(queries: Arc<ResourceQueryService>, assistant: Arc<dyn DocumentAssistant>) -> Self {
        Self { queries, assistant }
    }

    pub async fn ask(&self, resource_id: Uuid, question: &str, viewer: &User) -> Result<String> {
        let question = question.trim();
        let length = question.chars().count() as u64;
        if length == 0 || length > MAX_QUESTION_LENGTH {
            return Err(AppError::Validation(format!(
                "Question must be 1-{} characters",
                MAX_QUESTION_LENGTH
            )));
        }

        let resource = self.queries.get_visible(resource_id, Some(viewer)).await?;
        if !resource.is_approved() || resource.content.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Questions can only be asked about approved resources".to_string(),
            ));
        }

        self.assistant
            .answer(&resource.content, question)
            .await
            .map_err(|e| {
                tracing::warn!("Assistant failed for resource {}: {}", resource_id, e);
                AppError::ExternalServiceError(ASSISTANT_FAILURE_MESSAGE.to_string())
            })
    }
}
