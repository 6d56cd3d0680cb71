// src/auth/token.rs
// DOCUMENTATION: Session token signing and verification
// PURPOSE: HS256 tokens carrying only the user id; minted on Google login,
// checked by the auth middleware on every protected request

use crate::errors::ApiError;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in a session token.
/// Only the user id and expiry are stored; everything else (email, username)
/// is loaded fresh from the database when the token is verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub exp: usize,
}

/// Mint a session token for a user.
/// Tokens are valid until their expiry; there is no refresh rotation and no
/// revocation list.
pub fn sign(user_id: Uuid, secret: &str, expiration_hours: i64) -> Result<String, ApiError> {
    let expires_at = Utc::now()
        .checked_add_signed(Duration::hours(expiration_hours))
        .ok_or_else(|| ApiError::Internal("Token expiry out of range".to_string()))?
        .timestamp();

    let claims = Claims {
        id: user_id,
        exp: expires_at as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Token signing failed: {}", e)))
}

/// Verify a session token's signature and expiry, returning its claims.
/// Every failure mode (garbage input, bad signature, expired) collapses to
/// the same Unauthorized error so callers cannot distinguish them.
pub fn verify(token: &str, secret: &str) -> Result<Claims, ApiError> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn sign_then_verify_round_trips_the_user_id() {
        let user_id = Uuid::new_v4();
        let token = sign(user_id, SECRET, 24).unwrap();
        let claims = verify(&token, SECRET).unwrap();
        assert_eq!(claims.id, user_id);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign(Uuid::new_v4(), SECRET, -1).unwrap();
        let err = verify(&token, SECRET).unwrap_err();
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign(Uuid::new_v4(), SECRET, 24).unwrap();
        assert!(verify(&token, "other-secret").is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = sign(Uuid::new_v4(), SECRET, 24).unwrap();
        let mut tampered = token.clone();
        tampered.truncate(token.len() - 2);
        assert!(verify(&tampered, SECRET).is_err());
    }

    #[test]
    fn garbage_input_is_rejected() {
        assert!(verify("not-a-token", SECRET).is_err());
        assert!(verify("", SECRET).is_err());
    }
}
