//! User repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::models::{NewUser, User};
use crate::repositories::UserStore;

const USER_COLUMNS: &str = "id, username, password_hash, name, token, created_at, updated_at";

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, new_user: &NewUser) -> Result<Option<User>> {
        info!("Creating new user: {}", new_user.username);

        let inserted = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.name)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!("Username already taken: {}", new_user.username);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<Option<User>> {
        info!("Updating user: {}", user.id);

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = $2, password_hash = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn set_token(&self, user_id: i64, token: Option<&str>) -> Result<()> {
        sqlx::query("UPDATE users SET token = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
