use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::catalogs::CatalogService;
use crate::features::users::models::{ProfileUpdate, User, UserRole};
use crate::features::users::stores::UserStore;
use crate::shared::validation::normalize_catalog_value;

/// User directory backed by a `UserStore`
pub struct UserService {
    store: Arc<dyn UserStore>,
    catalogs: Arc<CatalogService>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, catalogs: Arc<CatalogService>) -> Self {
        Self { store, catalogs }
    }

    /// Returns the directory entry for the token subject, creating a Student
    /// entry on first sight.
    pub async fn resolve_or_create(&self, identity: &AuthenticatedUser) -> Result<User> {
        if let Some(user) = self.store.get(&identity.sub).await? {
            return Ok(user);
        }

        let user = self.store.insert_if_absent(&User::student(identity)).await?;
        tracing::info!("User registered: {} ({})", user.uid, user.name);
        Ok(user)
    }

    pub async fn get(&self, uid: &str) -> Result<User> {
        self.store
            .get(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))
    }

    pub async fn update_affiliation(&self, uid: &str, update: ProfileUpdate) -> Result<User> {
        let update = ProfileUpdate {
            name: update
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            university: update
                .university
                .map(|u| normalize_catalog_value(&u))
                .filter(|u| !u.is_empty()),
            department: update
                .department
                .map(|d| normalize_catalog_value(&d))
                .filter(|d| !d.is_empty()),
        };

        let user = self
            .store
            .update_profile(uid, &update)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))?;

        self.catalogs
            .register(
                update.university.as_deref(),
                update.department.as_deref(),
                None,
            )
            .await;

        tracing::info!("Profile updated: {}", uid);
        Ok(user)
    }

    pub async fn set_role(&self, uid: &str, role: UserRole) -> Result<User> {
        let user = self
            .store
            .set_role(uid, role)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))?;

        tracing::info!("Role of {} set to {}", uid, role);
        Ok(user)
    }
}
