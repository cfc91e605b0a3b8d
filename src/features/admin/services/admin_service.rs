use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::catalogs::CatalogService;
use crate::features::resources::models::{Resource, ReviewDecision};
use crate::features::resources::services::{LifecycleService, ResourceQueryService};
use crate::features::users::models::{User, UserRole};
use crate::features::users::UserService;

/// Administrator operations over the resource, user and catalog services
pub struct AdminService {
    lifecycle: Arc<LifecycleService>,
    queries: Arc<ResourceQueryService>,
    users: Arc<UserService>,
    catalogs: Arc<CatalogService>,
}

impl AdminService {
    pub fn new(
        lifecycle: Arc<LifecycleService>,
        queries: Arc<ResourceQueryService>,
        users: Arc<UserService>,
        catalogs: Arc<CatalogService>,
    ) -> Self {
        Self {
            lifecycle,
            queries,
            users,
            catalogs,
        }
    }

    // =========================================================================
    // RESOURCES
    // =========================================================================

    /// Review queue: pending first
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.queries.list_all().await
    }

    pub async fn review_resource(
        &self,
        id: Uuid,
        decision: ReviewDecision,
        admin: &User,
    ) -> Result<Resource> {
        self.lifecycle.transition(id, decision, &admin.uid).await
    }

    pub async fn retry_enrichment(&self, id: Uuid) -> Result<Resource> {
        self.lifecycle.retry_enrichment(id).await
    }

    // =========================================================================
    // USERS
    // =========================================================================

    pub async fn set_role(&self, uid: &str, role: UserRole) -> Result<User> {
        self.users.set_role(uid, role).await
    }

    // =========================================================================
    // CATALOGS
    // =========================================================================

    pub async fn add_university(&self, name: &str) -> Result<(String, bool)> {
        self.catalogs.add_university(name).await
    }

    pub async fn add_department(&self, name: &str) -> Result<(String, bool)> {
        self.catalogs.add_department(name).await
    }

    pub async fn add_subject(&self, department: &str, subject: &str) -> Result<(String, bool)> {
        self.catalogs.add_subject(department, subject).await
    }
}
