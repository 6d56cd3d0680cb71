// src/handlers/public.rs
// DOCUMENTATION: HTTP handlers for public browsing
// PURPOSE: Unauthenticated destination catalog reads

use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::services::DestinationService;

/// GET /pub/destinations
pub async fn list_destinations(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let destinations = DestinationService::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(destinations))
}

/// GET /pub/destinations/{id}
pub async fn get_destination(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let destination = DestinationService::get(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(destination))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pub")
            .route("/destinations", web::get().to(list_destinations))
            .route("/destinations/{id}", web::get().to(get_destination)),
    );
}
