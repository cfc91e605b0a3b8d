mod assistant_service;
mod lifecycle_service;
mod query_service;
mod text_extraction;

pub use assistant_service::AssistantService;
pub use lifecycle_service::LifecycleService;
pub use query_service::ResourceQueryService;
