use async_trait::async_trait;
use sqlx::PgPool;

use super::UserStore;
use crate::core::error::{AppError, Result};
use crate::features::users::models::{ProfileUpdate, User, UserRole};

const USER_COLUMNS: &str =
    "uid, name, email, role, university, department, created_at, updated_at";

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get(&self, uid: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE uid = $1", USER_COLUMNS);

        sqlx::query_as::<_, User>(&sql)
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get user {}: {:?}", uid, e);
                AppError::from(e)
            })
    }

    async fn insert_if_absent(&self, user: &User) -> Result<User> {
        let sql = format!(
            r#"
            INSERT INTO users (uid, name, email, role, university, department, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (uid) DO NOTHING
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let inserted = sqlx::query_as::<_, User>(&sql)
            .bind(&user.uid)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.role)
            .bind(&user.university)
            .bind(&user.department)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert user {}: {:?}", user.uid, e);
                AppError::from(e)
            })?;

        match inserted {
            Some(row) => Ok(row),
            // Lost the race against a concurrent first request
            None => self.get(&user.uid).await?.ok_or_else(|| {
                AppError::Internal(format!("User {} vanished after insert conflict", user.uid))
            }),
        }
    }

    async fn update_profile(&self, uid: &str, update: &ProfileUpdate) -> Result<Option<User>> {
        let sql = format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                university = COALESCE($3, university),
                department = COALESCE($4, department),
                updated_at = NOW()
            WHERE uid = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(uid)
            .bind(&update.name)
            .bind(&update.university)
            .bind(&update.department)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update profile of {}: {:?}", uid, e);
                AppError::from(e)
            })
    }

    async fn set_role(&self, uid: &str, role: UserRole) -> Result<Option<User>> {
        let sql = format!(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE uid = $1 RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(uid)
            .bind(role)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to set role of {}: {:?}", uid, e);
                AppError::from(e)
            })
    }
}
