use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "catalog_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    University,
    Department,
    /// Keyed by the department it belongs to
    Subject,
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKind::University => write!(f, "university"),
            CatalogKind::Department => write!(f, "department"),
            CatalogKind::Subject => write!(f, "subject"),
        }
    }
}

/// Database model for one catalog value. `parent` is the department for
/// subjects and empty otherwise.
#[derive(Debug, Clone, FromRow)]
pub struct CatalogEntry {
    pub kind: CatalogKind,
    pub value: String,
    pub parent: String,
    pub created_at: DateTime<Utc>,
}
