//! User repository

use sqlx::PgPool;

use super::DbError;
use crate::models::{NewUser, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, name, is_active FROM users ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    pub async fn get(&self, id: i32) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, is_active FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a user. A taken email surfaces as `DbError::Conflict`.
    pub async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name)
            VALUES ($1, $2)
            RETURNING id, email, name, is_active
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .fetch_one(self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(DbError::Conflict(
                format!("a user with email '{}' already exists", user.email),
            )),
            Err(e) => Err(e.into()),
        }
    }
}
