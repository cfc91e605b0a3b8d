use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::resources::handlers::resource_handler;
use crate::features::resources::services::{
    AssistantService, LifecycleService, ResourceQueryService,
};

#[derive(Clone)]
pub struct ResourceState {
    pub lifecycle: Arc<LifecycleService>,
    pub queries: Arc<ResourceQueryService>,
    pub assistant: Arc<AssistantService>,
}

/// Public listing of approved resources
pub fn public_routes(state: ResourceState) -> Router {
    Router::new()
        .route("/api/resources", get(resource_handler::list_resources))
        .with_state(state)
}

/// Routes that need a resolved directory user
pub fn protected_routes(state: ResourceState) -> Router {
    Router::new()
        .route("/api/resources", post(resource_handler::upload_resource))
        .route("/api/resources/mine", get(resource_handler::list_my_resources))
        .route("/api/resources/browse", get(resource_handler::browse_resources))
        .route("/api/resources/{id}", get(resource_handler::get_resource))
        .route("/api/resources/{id}/ask", post(resource_handler::ask_question))
        .with_state(state)
}
