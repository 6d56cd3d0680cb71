// src/handlers/trips.rs
// DOCUMENTATION: HTTP handlers for trip operations
// PURPOSE: Parse requests, call services, return responses

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{AuthUser, RequireAuth};
use crate::errors::ApiError;
use crate::models::{CreateTripRequest, UpdateTripRequest};
use crate::services::{PlanGenerator, TripService};
use crate::validation::first_validation_message;

use super::{budget_items, itineraries};

/// GET /trips
pub async fn list_trips(
    pool: web::Data<PgPool>,
    user: AuthUser,
) -> Result<impl Responder, ApiError> {
    let trips = TripService::list(pool.get_ref(), user.id).await?;
    Ok(HttpResponse::Ok().json(trips))
}

/// POST /trips
pub async fn create_trip(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreateTripRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(first_validation_message(&e)));
    }

    let trip = TripService::create(pool.get_ref(), user.id, req.into_inner()).await?;
    Ok(HttpResponse::Created().json(trip))
}

/// GET /trips/{trip_id}
pub async fn get_trip(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let trip = TripService::get(pool.get_ref(), path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(trip))
}

/// PUT /trips/{trip_id}
pub async fn update_trip(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateTripRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(first_validation_message(&e)));
    }

    let trip =
        TripService::update(pool.get_ref(), path.into_inner(), user.id, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(trip))
}

/// DELETE /trips/{trip_id}
pub async fn delete_trip(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    TripService::delete(pool.get_ref(), path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Trip deleted successfully" })))
}

/// PUT /trips/{trip_id}/regenerate
pub async fn regenerate_plan(
    pool: web::Data<PgPool>,
    generator: web::Data<dyn PlanGenerator>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let trip = TripService::regenerate_plan(
        pool.get_ref(),
        generator.get_ref(),
        path.into_inner(),
        user.id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(trip))
}

/// Configuration for trip routes. Itinerary and budget-item collections are
/// addressed under their trip, so those collection routes register here; the
/// entry-addressed routes live in their own scopes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/trips")
            .wrap(RequireAuth)
            .route("", web::get().to(list_trips))
            .route("", web::post().to(create_trip))
            .route("/{trip_id}", web::get().to(get_trip))
            .route("/{trip_id}", web::put().to(update_trip))
            .route("/{trip_id}", web::delete().to(delete_trip))
            .route("/{trip_id}/regenerate", web::put().to(regenerate_plan))
            .route(
                "/{trip_id}/itineraries",
                web::get().to(itineraries::list_itineraries),
            )
            .route(
                "/{trip_id}/itineraries",
                web::post().to(itineraries::create_itinerary),
            )
            .route(
                "/{trip_id}/budget-items",
                web::get().to(budget_items::list_budget_items),
            )
            .route(
                "/{trip_id}/budget-items",
                web::post().to(budget_items::create_budget_item),
            ),
    );
}
