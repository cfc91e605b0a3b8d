use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

use crate::features::auth::model::AuthenticatedUser;

/// Closed set of roles. Every visibility decision matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    Student,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "Student"),
            UserRole::Admin => write!(f, "Admin"),
        }
    }
}

/// Directory entry keyed by the auth subject
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub uid: String,
    pub name: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub university: Option<String>,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Default entry for a first-time visitor
    pub fn student(identity: &AuthenticatedUser) -> Self {
        let now = Utc::now();
        Self {
            uid: identity.sub.clone(),
            name: identity.display_name(),
            email: identity.email.clone(),
            role: UserRole::Student,
            university: None,
            department: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        match self.role {
            UserRole::Admin => true,
            UserRole::Student => false,
        }
    }
}

/// Self-service profile changes. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub university: Option<String>,
    pub department: Option<String>,
}
