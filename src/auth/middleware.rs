// src/auth/middleware.rs
// DOCUMENTATION: Bearer-token authentication gate
// PURPOSE: Verify the session token on protected scopes, load the user, and
// expose a minimal identity to handlers via request extensions

use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ok, ready, Ready};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::token;
use crate::config::Config;
use crate::db::UserRepository;
use crate::errors::ApiError;

/// Minimal identity attached to authenticated requests.
/// Loaded fresh from the database on every request; a deleted account stops
/// working immediately even while its token is unexpired.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    /// Handlers on protected scopes receive the identity the middleware
    /// stored. Reaching this without the middleware is a routing mistake and
    /// fails closed with the same Unauthorized the gate uses.
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .cloned()
                .ok_or_else(|| ApiError::Unauthorized("Please login first".to_string())),
        )
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
/// This is the only accepted convention; no custom header fallback.
pub fn parse_bearer(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Authentication middleware for protected scopes.
/// Wrap a scope with `RequireAuth` and every request inside it must carry a
/// valid bearer token; failures never reach the handler.
pub struct RequireAuth;

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = RequireAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RequireAuthService {
            service: Arc::new(service),
        })
    }
}

pub struct RequireAuthService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            let header_token = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(parse_bearer)
                .map(str::to_owned);

            let bearer = header_token
                .ok_or_else(|| ApiError::Unauthorized("Please login first".to_string()))?;

            // The secret and pool are registered as app data in main; their
            // absence is a wiring bug, not a caller mistake.
            let config = req
                .app_data::<web::Data<Config>>()
                .cloned()
                .ok_or_else(|| ApiError::Internal("Config not registered".to_string()))?;
            let pool = req
                .app_data::<web::Data<PgPool>>()
                .cloned()
                .ok_or_else(|| ApiError::Internal("Database pool not registered".to_string()))?;

            let claims = token::verify(&bearer, &config.jwt_secret)?;

            let user = UserRepository::find_by_id(pool.get_ref(), claims.id)
                .await?
                .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

            req.extensions_mut().insert(AuthUser {
                id: user.id,
                email: user.email,
                username: user.username,
            });

            srv.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn parse_bearer_extracts_the_token() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_bearer_rejects_other_schemes() {
        assert_eq!(parse_bearer("Basic dXNlcjpwYXNz"), None);
        assert_eq!(parse_bearer("bearer abc"), None);
        assert_eq!(parse_bearer("abc.def.ghi"), None);
    }

    #[test]
    fn parse_bearer_rejects_empty_tokens() {
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer    "), None);
    }

    #[actix_web::test]
    async fn extractor_fails_closed_without_middleware() {
        let req = TestRequest::default().to_http_request();
        let result = AuthUser::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn extractor_returns_identity_stored_by_the_gate() {
        let req = TestRequest::default().to_http_request();
        let identity = AuthUser {
            id: Uuid::new_v4(),
            email: "traveler@example.com".to_string(),
            username: "Traveler".to_string(),
        };
        req.extensions_mut().insert(identity.clone());

        let extracted = AuthUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(extracted.id, identity.id);
        assert_eq!(extracted.email, "traveler@example.com");
    }
}
