// src/handlers/itineraries.rs
// DOCUMENTATION: HTTP handlers for itinerary operations
// PURPOSE: Parse requests, call services, return responses

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{AuthUser, RequireAuth};
use crate::errors::ApiError;
use crate::models::{CreateItineraryRequest, UpdateItineraryRequest};
use crate::services::ItineraryService;
use crate::validation::first_validation_message;

/// GET /trips/{trip_id}/itineraries
pub async fn list_itineraries(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let entries = ItineraryService::list(pool.get_ref(), path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// POST /trips/{trip_id}/itineraries
pub async fn create_itinerary(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<CreateItineraryRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(first_validation_message(&e)));
    }

    let entry =
        ItineraryService::create(pool.get_ref(), path.into_inner(), user.id, req.into_inner())
            .await?;
    Ok(HttpResponse::Created().json(entry))
}

/// PUT /itineraries/{id}
pub async fn update_itinerary(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateItineraryRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(first_validation_message(&e)));
    }

    let entry =
        ItineraryService::update(pool.get_ref(), path.into_inner(), user.id, req.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(entry))
}

/// DELETE /itineraries/{id}
pub async fn delete_itinerary(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    ItineraryService::delete(pool.get_ref(), path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Itinerary deleted" })))
}

/// Entry-addressed routes; the collection routes register under /trips.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/itineraries")
            .wrap(RequireAuth)
            .route("/{id}", web::put().to(update_itinerary))
            .route("/{id}", web::delete().to(delete_itinerary)),
    );
}
