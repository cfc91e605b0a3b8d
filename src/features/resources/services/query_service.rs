//! Read-side projections of resources.
//!
//! List reads are fail-soft: a store failure is logged and yields an empty
//! list so browse pages degrade instead of erroring.

use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::resources::models::{Resource, ResourceFilter, ResourceStatus};
use crate::features::resources::stores::{ResourceQuery, ResourceStore};
use crate::features::users::models::{User, UserRole};

pub struct ResourceQueryService {
    store: Arc<dyn ResourceStore>,
}

impl ResourceQueryService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    async fn fetch(&self, query: ResourceQuery, label: &str) -> Vec<Resource> {
        self.store.list(&query).await.unwrap_or_else(|e| {
            tracing::warn!("Listing {} resources failed, returning none: {}", label, e);
            Vec::new()
        })
    }

    pub async fn list_approved(&self) -> Vec<Resource> {
        self.fetch(ResourceQuery::with_status(ResourceStatus::Approved), "approved")
            .await
    }

    /// Every resource, pending ones first, otherwise in creation order
    pub async fn list_all(&self) -> Vec<Resource> {
        let mut resources = self.fetch(ResourceQuery::default(), "all").await;
        resources.sort_by_key(|r| r.status != ResourceStatus::Pending);
        resources
    }

    pub async fn list_by_uploader(&self, uploader_id: &str) -> Vec<Resource> {
        self.fetch(ResourceQuery::by_uploader(uploader_id), "uploader")
            .await
    }

    pub async fn list_visible(&self, role: UserRole, filter: &ResourceFilter) -> Vec<Resource> {
        let resources = match role {
            UserRole::Admin => self.list_all().await,
            UserRole::Student => self.list_approved().await,
        };

        resources.into_iter().filter(|r| filter.matches(r)).collect()
    }

    /// Detail view. Approved resources are public; anything else is visible
    /// to its uploader and to admins only.
    pub async fn get_visible(&self, id: Uuid, viewer: Option<&User>) -> Result<Resource> {
        let not_found = || AppError::NotFound(format!("Resource {} not found", id));
        let resource = self.store.get(id).await?.ok_or_else(not_found)?;

        if resource.is_approved() {
            return Ok(resource);
        }

        let allowed = viewer.is_some_and(|user| match user.role {
            UserRole::Admin => true,
            UserRole::Student => user.uid == resource.uploader_id,
        });

        if allowed {
            Ok(resource)
        } else {
            Err(not_found())
        }
    }
}
