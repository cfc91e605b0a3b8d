use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::resources::models::{
    EnrichmentStatus, FileType, Resource, ResourceDetails, ResourceStatus, ReviewDecision,
};

/// Upload form for OpenAPI documentation.
/// The handler reads the multipart body field by field.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadResourceDto {
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    #[schema(example = "Algorithms Notes Chapter One")]
    pub title: String,
    pub description: String,
    #[schema(example = "City College")]
    pub university: String,
    #[schema(example = "Computer Science")]
    pub department: String,
    #[schema(example = "3rd")]
    pub semester: String,
    #[schema(example = "Algorithms")]
    pub subject: String,
    #[schema(example = "Note")]
    pub file_type: String,
}

/// Descriptive upload fields, validated before anything is stored
#[derive(Debug, Clone, Default, Validate)]
pub struct ResourceDraftDto {
    #[validate(length(min = 5, max = 200, message = "Title must be 5-200 characters"))]
    pub title: String,

    #[validate(length(min = 10, max = 5000, message = "Description must be at least 10 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 120, message = "University is required"))]
    pub university: String,

    #[validate(length(min = 1, max = 120, message = "Department is required"))]
    pub department: String,

    #[validate(length(min = 1, max = 20, message = "Semester is required"))]
    pub semester: String,

    #[validate(length(min = 1, max = 120, message = "Subject is required"))]
    pub subject: String,

    pub file_type: Option<FileType>,
}

impl ResourceDraftDto {
    /// Strips surrounding whitespace so length rules apply to the stored value.
    /// Call before `validate()`.
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            university: self.university.trim().to_string(),
            department: self.department.trim().to_string(),
            semester: self.semester.trim().to_string(),
            subject: self.subject.trim().to_string(),
            file_type: self.file_type,
        }
    }

    /// The file type defaults to `Note`
    pub fn into_details(self) -> ResourceDetails {
        ResourceDetails {
            title: self.title,
            description: self.description,
            university: self.university,
            department: self.department,
            semester: self.semester,
            subject: self.subject,
            file_type: self.file_type.unwrap_or(FileType::Note),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub university: String,
    pub department: String,
    pub semester: String,
    pub subject: String,
    pub file_type: FileType,
    pub tags: Vec<String>,
    pub file_url: String,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub status: ResourceStatus,
    pub summary: String,
    pub short_notes: String,
    pub enrichment_status: EnrichmentStatus,
    pub uploader_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl From<Resource> for ResourceDto {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.id,
            title: resource.title,
            description: resource.description,
            university: resource.university,
            department: resource.department,
            semester: resource.semester,
            subject: resource.subject,
            file_type: resource.file_type,
            tags: resource.tags,
            file_url: resource.file_url,
            file_name: resource.file_name,
            content_type: resource.content_type,
            file_size: resource.file_size,
            status: resource.status,
            summary: resource.summary,
            short_notes: resource.short_notes,
            enrichment_status: resource.enrichment_status,
            uploader_id: resource.uploader_id,
            created_at: resource.created_at,
            updated_at: resource.updated_at,
            reviewed_at: resource.reviewed_at,
        }
    }
}

/// Review bookkeeping shown to admins on top of the public fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResourceDto {
    #[serde(flatten)]
    pub resource: ResourceDto,
    pub enrichment_attempt: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
}

impl From<Resource> for AdminResourceDto {
    fn from(resource: Resource) -> Self {
        let enrichment_attempt = resource.enrichment_attempt;
        let reviewed_by = resource.reviewed_by.clone();
        Self {
            resource: resource.into(),
            enrichment_attempt,
            reviewed_by,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewResourceDto {
    pub status: ReviewDecision,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AskQuestionDto {
    #[validate(length(min = 1, max = 1000, message = "Question must be 1-1000 characters"))]
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerDto {
    pub answer: String,
}
