// src/models/user.rs
// DOCUMENTATION: User identity models
// PURPOSE: Database row and login DTOs for the users table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A registered user, created lazily on first Google login.
/// The provider binding (provider + provider_id) is written once and never
/// changed; users are never deleted in normal flow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,

    /// Unique login email, taken from the verified Google identity
    pub email: String,

    /// Display name
    pub username: String,

    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,

    /// External identity provider ("google")
    pub provider: String,

    /// Unique id assigned by the provider (Google `sub` claim)
    #[serde(rename = "providerId")]
    pub provider_id: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for the lazy user creation on first login.
/// Internal only; users are never created from a client-supplied body.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub avatar_url: String,
    pub provider: String,
    pub provider_id: String,
}

/// Request DTO for POST /login/google
#[derive(Debug, Deserialize, Validate)]
pub struct GoogleLoginRequest {
    /// Google ID token obtained by the browser client
    #[serde(rename = "googleToken")]
    #[validate(length(min = 1, message = "Google token is required"))]
    pub google_token: String,
}

/// Response DTO for POST /login/google
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_rejects_empty_token() {
        let req = GoogleLoginRequest {
            google_token: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn user_serializes_with_wire_field_names() {
        let user = User {
            id: Uuid::nil(),
            email: "traveler@example.com".to_string(),
            username: "Traveler".to_string(),
            avatar_url: "https://example.com/a.png".to_string(),
            provider: "google".to_string(),
            provider_id: "sub-123".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("avatarUrl").is_some());
        assert!(json.get("providerId").is_some());
        assert!(json.get("avatar_url").is_none());
    }
}
