#[cfg(test)]
mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::users::models::{ProfileUpdate, User, UserRole};

#[cfg(test)]
pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, uid: &str) -> Result<Option<User>>;

    /// Inserts the user unless the uid exists, returning the stored row either way
    async fn insert_if_absent(&self, user: &User) -> Result<User>;

    /// Merges the given fields. `None` when the uid is unknown.
    async fn update_profile(&self, uid: &str, update: &ProfileUpdate) -> Result<Option<User>>;

    async fn set_role(&self, uid: &str, role: UserRole) -> Result<Option<User>>;
}
