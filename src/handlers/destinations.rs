// src/handlers/destinations.rs
// DOCUMENTATION: HTTP handlers for destination management
// PURPOSE: Authenticated catalog curation and Google place imports; public
// browsing lives under /pub

use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::auth::RequireAuth;
use crate::errors::ApiError;
use crate::models::{CreateDestinationRequest, ImportDestinationRequest, UpdateDestinationRequest};
use crate::services::{DestinationService, GooglePlacesClient};
use crate::validation::first_validation_message;

/// POST /destinations
pub async fn create_destination(
    pool: web::Data<PgPool>,
    req: web::Json<CreateDestinationRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(first_validation_message(&e)));
    }

    let destination = DestinationService::create(pool.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(destination))
}

/// POST /destinations/import
/// Look up a Google place and persist it; importing an already-known place
/// refreshes the stored row.
pub async fn import_destination(
    pool: web::Data<PgPool>,
    places: web::Data<GooglePlacesClient>,
    req: web::Json<ImportDestinationRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(first_validation_message(&e)));
    }

    let (destination, created) =
        DestinationService::import_google_place(pool.get_ref(), places.get_ref(), &req.place_id)
            .await?;

    if created {
        Ok(HttpResponse::Created().json(destination))
    } else {
        Ok(HttpResponse::Ok().json(destination))
    }
}

/// PUT /destinations/{id}
pub async fn update_destination(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateDestinationRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(first_validation_message(&e)));
    }

    let destination =
        DestinationService::update(pool.get_ref(), path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(destination))
}

/// DELETE /destinations/{id}
pub async fn delete_destination(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    DestinationService::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/destinations")
            .wrap(RequireAuth)
            .route("", web::post().to(create_destination))
            .route("/import", web::post().to(import_destination))
            .route("/{id}", web::put().to(update_destination))
            .route("/{id}", web::delete().to(delete_destination)),
    );
}
