// src/handlers/auth.rs
// DOCUMENTATION: HTTP handler for login
// PURPOSE: Exchange a Google ID token for a session token

use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

use crate::config::Config;
use crate::errors::ApiError;
use crate::models::GoogleLoginRequest;
use crate::services::{GoogleIdentityClient, UserService};
use crate::validation::first_validation_message;

/// POST /login/google
pub async fn google_login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    identity: web::Data<GoogleIdentityClient>,
    req: web::Json<GoogleLoginRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(first_validation_message(&e)));
    }

    let response = UserService::login_google(
        pool.get_ref(),
        config.get_ref(),
        identity.get_ref(),
        &req.google_token,
    )
    .await?;

    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/login").route("/google", web::post().to(google_login)));
}
