// src/services/itinerary_service.rs
// DOCUMENTATION: Business logic for itinerary entries
// PURPOSE: Day-by-day entries nested under a trip; every operation proves
// ownership through the parent trip before touching rows

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::ItineraryRepository;
use crate::errors::ApiError;
use crate::models::{CreateItineraryRequest, Itinerary, UpdateItineraryRequest};
use crate::services::ownership::require_owned_trip;

pub struct ItineraryService;

impl ItineraryService {
    pub async fn list(
        pool: &PgPool,
        trip_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Itinerary>, ApiError> {
        require_owned_trip(pool, trip_id, user_id).await?;
        ItineraryRepository::list_by_trip(pool, trip_id).await
    }

    pub async fn create(
        pool: &PgPool,
        trip_id: Uuid,
        user_id: Uuid,
        req: CreateItineraryRequest,
    ) -> Result<Itinerary, ApiError> {
        require_owned_trip(pool, trip_id, user_id).await?;
        ItineraryRepository::create(pool, trip_id, &req).await
    }

    /// Entries are addressed directly on update; ownership is proven by
    /// joining through the parent trip, so foreign entries read as missing.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        req: UpdateItineraryRequest,
    ) -> Result<Itinerary, ApiError> {
        let mut entry = ItineraryRepository::get_owned(pool, id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Itinerary not found".to_string()))?;

        entry.apply(req);
        ItineraryRepository::save(pool, &entry).await
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        ItineraryRepository::get_owned(pool, id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Itinerary not found".to_string()))?;

        let rows = ItineraryRepository::delete(pool, id).await?;
        if rows == 0 {
            return Err(ApiError::NotFound("Itinerary not found".to_string()));
        }
        Ok(())
    }
}
