pub mod admin;
pub mod auth;
pub mod catalogs;
pub mod resources;
pub mod users;

#[cfg(test)]
mod api_tests;

use axum::Router;
use std::sync::Arc;

use crate::features::admin::AdminService;
use crate::features::catalogs::CatalogService;
use crate::features::resources::services::{
    AssistantService, LifecycleService, ResourceQueryService,
};
use crate::features::resources::ResourceState;
use crate::features::users::UserService;

/// Service graph shared by every route
#[derive(Clone)]
pub struct AppServices {
    pub lifecycle: Arc<LifecycleService>,
    pub queries: Arc<ResourceQueryService>,
    pub assistant: Arc<AssistantService>,
    pub users: Arc<UserService>,
    pub catalogs: Arc<CatalogService>,
    pub admin: Arc<AdminService>,
}

impl AppServices {
    fn resource_state(&self) -> ResourceState {
        ResourceState {
            lifecycle: Arc::clone(&self.lifecycle),
            queries: Arc::clone(&self.queries),
            assistant: Arc::clone(&self.assistant),
        }
    }
}

/// Routes served without a token
pub fn public_routes(services: &AppServices) -> Router {
    Router::new()
        .merge(resources::routes::public_routes(services.resource_state()))
        .merge(catalogs::routes::routes(Arc::clone(&services.catalogs)))
}

/// Routes that read the directory user from request extensions. The caller
/// layers token validation and user resolution on top.
pub fn protected_routes(services: &AppServices) -> Router {
    Router::new()
        .merge(resources::routes::protected_routes(services.resource_state()))
        .merge(users::routes::routes(Arc::clone(&services.users)))
        .nest(
            "/api/admin",
            admin::routes::routes(Arc::clone(&services.admin)),
        )
}
