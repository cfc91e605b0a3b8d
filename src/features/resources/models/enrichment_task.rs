use uuid::Uuid;

/// Work item handed to the enrichment sink after approval
#[derive(Debug, Clone)]
pub struct EnrichmentJob {
    pub resource_id: Uuid,
    /// Attempt token; the write-back only lands if it still matches the record
    pub attempt: i32,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentTaskStatus {
    Queued,
    Running,
    Completed,
    Failed,
    TimedOut,
}

impl EnrichmentTaskStatus {
    pub fn is_in_flight(self) -> bool {
        matches!(self, EnrichmentTaskStatus::Queued | EnrichmentTaskStatus::Running)
    }
}

/// In-flight record of an enrichment job. Dropped once the job settles.
#[derive(Debug, Clone)]
pub struct EnrichmentTask {
    pub resource_id: Uuid,
    pub attempt: i32,
    pub status: EnrichmentTaskStatus,
}

/// Result written back onto the resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentWrite {
    Completed { summary: String, short_notes: String },
    Failed,
}

/// Published once a job has settled
#[derive(Debug, Clone)]
pub struct EnrichmentEvent {
    pub resource_id: Uuid,
    pub attempt: i32,
    pub status: EnrichmentTaskStatus,
    /// False when the write-back was discarded as stale or could not be stored
    pub applied: bool,
}
