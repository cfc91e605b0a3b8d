use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::{
    MAX_DERIVED_TAGS, NOTES_PENDING_APPROVAL, SUMMARY_PENDING_APPROVAL,
};

/// Review status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "resource_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceStatus::Pending => write!(f, "pending"),
            ResourceStatus::Approved => write!(f, "approved"),
            ResourceStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Administrator's verdict on a pending resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    pub fn target(self) -> ResourceStatus {
        match self {
            ReviewDecision::Approved => ResourceStatus::Approved,
            ReviewDecision::Rejected => ResourceStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The status must change to the contained value
    Applied(ResourceStatus),
    /// The resource already carries the requested status
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot change a {from} resource to {to}")]
pub struct InvalidTransition {
    pub from: ResourceStatus,
    pub to: ResourceStatus,
}

impl ResourceStatus {
    /// Transition table: pending moves to either terminal state, a repeated
    /// decision is a no-op, and terminal states never swap.
    pub fn apply(self, decision: ReviewDecision) -> Result<TransitionOutcome, InvalidTransition> {
        let target = decision.target();
        match (self, target) {
            (ResourceStatus::Pending, _) => Ok(TransitionOutcome::Applied(target)),
            (from, to) if from == to => Ok(TransitionOutcome::Unchanged),
            (from, to) => Err(InvalidTransition { from, to }),
        }
    }
}

/// Kind of uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "resource_file_type")]
pub enum FileType {
    #[sqlx(rename = "Note")]
    #[serde(rename = "Note")]
    Note,
    #[sqlx(rename = "Past Paper")]
    #[serde(rename = "Past Paper")]
    PastPaper,
    #[sqlx(rename = "Lab Manual")]
    #[serde(rename = "Lab Manual")]
    LabManual,
}

impl FileType {
    /// Wire name, also stored in the database
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Note => "Note",
            FileType::PastPaper => "Past Paper",
            FileType::LabManual => "Lab Manual",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Note" => Ok(FileType::Note),
            "Past Paper" => Ok(FileType::PastPaper),
            "Lab Manual" => Ok(FileType::LabManual),
            other => Err(format!(
                "Unknown file type '{}'. Expected Note, Past Paper or Lab Manual",
                other
            )),
        }
    }
}

/// Progress of the background summary job for an approved resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "enrichment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentStatus {
    NotStarted,
    Generating,
    Completed,
    Failed,
}

/// Database model for a shared academic resource
#[derive(Debug, Clone, FromRow)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub university: String,
    pub department: String,
    pub semester: String,
    pub subject: String,
    pub file_type: FileType,
    pub tags: Vec<String>,
    pub file_key: String,
    pub file_url: String,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub status: ResourceStatus,
    pub content: String,
    pub summary: String,
    pub short_notes: String,
    pub enrichment_status: EnrichmentStatus,
    pub enrichment_attempt: i32,
    pub uploader_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
}

/// Descriptive fields supplied by the uploader
#[derive(Debug, Clone)]
pub struct ResourceDetails {
    pub title: String,
    pub description: String,
    pub university: String,
    pub department: String,
    pub semester: String,
    pub subject: String,
    pub file_type: FileType,
}

/// Where the uploaded file ended up
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub key: String,
    pub url: String,
    pub name: String,
    pub content_type: String,
    pub size: i64,
}

impl Resource {
    /// A freshly uploaded resource awaiting review
    pub fn pending(details: ResourceDetails, file: StoredFile, uploader_id: &str) -> Self {
        let now = Utc::now();
        let tags = derive_tags(&details.title);

        Self {
            id: Uuid::now_v7(),
            title: details.title,
            description: details.description,
            university: details.university,
            department: details.department,
            semester: details.semester,
            subject: details.subject,
            file_type: details.file_type,
            tags,
            file_key: file.key,
            file_url: file.url,
            file_name: file.name,
            content_type: file.content_type,
            file_size: file.size,
            status: ResourceStatus::Pending,
            content: String::new(),
            summary: SUMMARY_PENDING_APPROVAL.to_string(),
            short_notes: NOTES_PENDING_APPROVAL.to_string(),
            enrichment_status: EnrichmentStatus::NotStarted,
            enrichment_attempt: 0,
            uploader_id: uploader_id.to_string(),
            created_at: now,
            updated_at: now,
            reviewed_at: None,
            reviewed_by: None,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == ResourceStatus::Approved
    }
}

/// First few lower-cased whitespace tokens of a title
pub fn derive_tags(title: &str) -> Vec<String> {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .take(MAX_DERIVED_TAGS)
        .collect()
}
