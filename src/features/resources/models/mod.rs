mod enrichment_task;
mod filter;
mod resource;
mod upload;

pub use enrichment_task::{
    EnrichmentEvent, EnrichmentJob, EnrichmentTask, EnrichmentTaskStatus, EnrichmentWrite,
};
pub use filter::ResourceFilter;
pub use resource::{
    derive_tags, EnrichmentStatus, FileType, InvalidTransition, Resource, ResourceDetails,
    ResourceStatus, ReviewDecision, StoredFile, TransitionOutcome,
};
pub use upload::{mime_essence, UploadedFile};
