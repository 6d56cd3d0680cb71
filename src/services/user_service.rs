// src/services/user_service.rs
// DOCUMENTATION: Business logic for accounts
// PURPOSE: Exchange a verified Google identity for a session token, creating
// the account lazily on first login

use sqlx::PgPool;

use crate::auth::token;
use crate::config::Config;
use crate::db::UserRepository;
use crate::errors::ApiError;
use crate::models::{LoginResponse, NewUser, User};
use crate::services::google_identity::{GoogleIdentityClient, GoogleTokenInfo};

pub struct UserService;

impl UserService {
    /// Google login: verify the ID token, find or create the account,
    /// issue a session token.
    pub async fn login_google(
        pool: &PgPool,
        config: &Config,
        identity: &GoogleIdentityClient,
        google_token: &str,
    ) -> Result<LoginResponse, ApiError> {
        let info = identity.verify_id_token(google_token).await?;
        let user = Self::find_or_create(pool, &info).await?;

        let access_token = token::sign(user.id, &config.jwt_secret, config.jwt_expiration_hours)?;
        log::info!("Issued session token for user {}", user.id);

        Ok(LoginResponse { access_token })
    }

    /// Accounts are keyed by email; the provider binding is written once at
    /// creation and never updated afterwards.
    async fn find_or_create(pool: &PgPool, info: &GoogleTokenInfo) -> Result<User, ApiError> {
        if let Some(user) = UserRepository::find_by_email(pool, &info.email).await? {
            return Ok(user);
        }

        let new_user = NewUser {
            email: info.email.clone(),
            username: info
                .name
                .clone()
                .unwrap_or_else(|| display_name_from_email(&info.email)),
            avatar_url: info.picture.clone().unwrap_or_default(),
            provider: "google".to_string(),
            provider_id: info.sub.clone(),
        };

        log::info!("First Google login, creating account for {}", info.email);
        UserRepository::create(pool, &new_user).await
    }
}

/// Fallback display name when Google returns no profile name.
fn display_name_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .unwrap_or(email)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_uses_email_local_part() {
        assert_eq!(display_name_from_email("andi@example.com"), "andi");
    }

    #[test]
    fn display_name_of_odd_email_falls_back_to_whole_string() {
        assert_eq!(display_name_from_email("no-at-sign"), "no-at-sign");
    }
}
