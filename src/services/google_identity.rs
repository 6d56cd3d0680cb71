// src/services/google_identity.rs
// DOCUMENTATION: Google ID-token verification
// PURPOSE: Resolve the googleToken sent by the browser into a verified
// profile via Google's tokeninfo endpoint

use reqwest::Client;
use serde::Deserialize;

use crate::errors::ApiError;

/// Verified profile claims returned by Google for an ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokenInfo {
    /// OAuth client the token was issued for; must match our own client id
    pub aud: String,
    /// Google's stable account identifier
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Reject tokens minted for a different OAuth client. Signature and expiry
/// are already checked by the tokeninfo endpoint itself.
pub fn verify_audience(info: &GoogleTokenInfo, expected_client_id: &str) -> Result<(), ApiError> {
    if info.aud == expected_client_id {
        Ok(())
    } else {
        log::warn!("Google token audience mismatch: {}", info.aud);
        Err(ApiError::Unauthorized("Invalid Google token".to_string()))
    }
}

pub struct GoogleIdentityClient {
    client: Client,
    client_id: String,
    tokeninfo_url: String,
}

impl GoogleIdentityClient {
    pub fn new(client_id: String) -> Self {
        Self {
            client: Client::new(),
            client_id,
            tokeninfo_url: "https://oauth2.googleapis.com/tokeninfo".to_string(),
        }
    }

    /// Verify an ID token with Google and check it was issued for us.
    /// Google answers 4xx for bad/expired tokens, which maps to Unauthorized;
    /// transport failures are upstream errors, not the caller's fault.
    pub async fn verify_id_token(&self, id_token: &str) -> Result<GoogleTokenInfo, ApiError> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| {
                log::error!("Google tokeninfo request failed: {}", e);
                ApiError::ExternalApi(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            log::warn!("Google rejected an ID token: {}", response.status());
            return Err(ApiError::Unauthorized("Invalid Google token".to_string()));
        }

        let info: GoogleTokenInfo = response.json().await.map_err(|e| {
            log::error!("Failed to parse tokeninfo response: {}", e);
            ApiError::ExternalApi(format!("Parse error: {}", e))
        })?;

        verify_audience(&info, &self.client_id)?;
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info(aud: &str) -> GoogleTokenInfo {
        GoogleTokenInfo {
            aud: aud.to_string(),
            sub: "108333555777".to_string(),
            email: "traveler@example.com".to_string(),
            name: Some("Traveler".to_string()),
            picture: Some("https://example.com/a.png".to_string()),
        }
    }

    #[test]
    fn matching_audience_is_accepted() {
        let info = sample_info("our-client-id.apps.googleusercontent.com");
        assert!(verify_audience(&info, "our-client-id.apps.googleusercontent.com").is_ok());
    }

    #[test]
    fn foreign_audience_is_rejected_as_unauthorized() {
        let info = sample_info("someone-else.apps.googleusercontent.com");
        let err = verify_audience(&info, "our-client-id.apps.googleusercontent.com").unwrap_err();
        assert_eq!(err.to_string(), "Invalid Google token");
    }

    #[test]
    fn tokeninfo_parses_optional_profile_fields() {
        let json = r#"{
            "aud": "our-client-id",
            "sub": "108333555777",
            "email": "traveler@example.com"
        }"#;
        let info: GoogleTokenInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.email, "traveler@example.com");
        assert!(info.name.is_none());
        assert!(info.picture.is_none());
    }
}
