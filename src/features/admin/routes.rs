use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin routes (all require the Admin role)
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/resources", get(handlers::list_resources))
        .route("/resources/{id}/status", patch(handlers::review_resource))
        .route("/resources/{id}/enrichment", post(handlers::retry_enrichment))
        .route("/users/{uid}/role", patch(handlers::set_user_role))
        .route("/catalogs/universities", post(handlers::add_university))
        .route("/catalogs/departments", post(handlers::add_department))
        .route("/catalogs/subjects", post(handlers::add_subject))
        .with_state(admin_service)
}
