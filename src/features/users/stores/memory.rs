use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use super::UserStore;
use crate::core::error::{AppError, Result};
use crate::features::users::models::{ProfileUpdate, User, UserRole};

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    unavailable: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap().len()
    }

    fn check(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn modify(&self, uid: &str, change: impl FnOnce(&mut User)) -> Result<Option<User>> {
        self.check()?;
        let mut users = self.users.write().unwrap();
        Ok(users.get_mut(uid).map(|user| {
            change(user);
            user.updated_at = Utc::now();
            user.clone()
        }))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, uid: &str) -> Result<Option<User>> {
        self.check()?;
        Ok(self.users.read().unwrap().get(uid).cloned())
    }

    async fn insert_if_absent(&self, user: &User) -> Result<User> {
        self.check()?;
        let mut users = self.users.write().unwrap();
        Ok(users
            .entry(user.uid.clone())
            .or_insert_with(|| user.clone())
            .clone())
    }

    async fn update_profile(&self, uid: &str, update: &ProfileUpdate) -> Result<Option<User>> {
        self.modify(uid, |user| {
            if let Some(name) = &update.name {
                user.name = name.clone();
            }
            if let Some(university) = &update.university {
                user.university = Some(university.clone());
            }
            if let Some(department) = &update.department {
                user.department = Some(department.clone());
            }
        })
    }

    async fn set_role(&self, uid: &str, role: UserRole) -> Result<Option<User>> {
        self.modify(uid, |user| user.role = role)
    }
}
