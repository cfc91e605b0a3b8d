use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::catalogs::handlers;
use crate::features::catalogs::services::CatalogService;

/// Public catalog routes. Additions live under the admin feature.
pub fn routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/catalogs", get(handlers::get_filters))
        .with_state(service)
}
