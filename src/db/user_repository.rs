// src/db/user_repository.rs
// DOCUMENTATION: Database access for users
// PURPOSE: Lookups by id/email and the lazy insert on first login

use crate::errors::ApiError;
use crate::models::{NewUser, User};
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    /// Load a user by primary key. Used by the auth middleware on every
    /// protected request.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, avatar_url, provider, provider_id,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to load user {}: {}", id, e);
            ApiError::Database(e.to_string())
        })
    }

    /// Load a user by login email. Used by the Google login flow to decide
    /// between resolve and create.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, avatar_url, provider, provider_id,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to load user by email: {}", e);
            ApiError::Database(e.to_string())
        })
    }

    /// Insert the user row created lazily on first login. The provider
    /// binding is written here once and never updated afterwards.
    pub async fn create(pool: &PgPool, new_user: &NewUser) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, username, avatar_url, provider, provider_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, username, avatar_url, provider, provider_id,
                      created_at, updated_at
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.avatar_url)
        .bind(&new_user.provider)
        .bind(&new_user.provider_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create user: {}", e);
            ApiError::Database(e.to_string())
        })?;

        log::info!("Created user {} on first login", user.id);
        Ok(user)
    }
}
