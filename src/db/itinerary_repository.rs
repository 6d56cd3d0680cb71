// src/db/itinerary_repository.rs
// DOCUMENTATION: Database access for itinerary entries
// PURPOSE: Per-trip listing ordered by day and ownership-aware lookups

use crate::errors::ApiError;
use crate::models::{CreateItineraryRequest, Itinerary};
use sqlx::PgPool;
use uuid::Uuid;

const ITINERARY_COLUMNS: &str =
    "id, trip_id, day_number, location, activity, notes, created_at, updated_at";

pub struct ItineraryRepository;

impl ItineraryRepository {
    /// All entries of one trip, day 1 first.
    pub async fn list_by_trip(pool: &PgPool, trip_id: Uuid) -> Result<Vec<Itinerary>, ApiError> {
        sqlx::query_as::<_, Itinerary>(&format!(
            "SELECT {} FROM itineraries WHERE trip_id = $1 ORDER BY day_number ASC",
            ITINERARY_COLUMNS
        ))
        .bind(trip_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list itineraries for trip {}: {}", trip_id, e);
            ApiError::Database(e.to_string())
        })
    }

    /// One entry, only if the trip it belongs to is owned by the given user.
    /// The join makes a non-owned id indistinguishable from an absent one.
    pub async fn get_owned(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Itinerary>, ApiError> {
        sqlx::query_as::<_, Itinerary>(
            r#"
            SELECT i.id, i.trip_id, i.day_number, i.location, i.activity,
                   i.notes, i.created_at, i.updated_at
            FROM itineraries i
            JOIN trips t ON t.id = i.trip_id
            WHERE i.id = $1 AND t.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to load itinerary {}: {}", id, e);
            ApiError::Database(e.to_string())
        })
    }

    pub async fn create(
        pool: &PgPool,
        trip_id: Uuid,
        req: &CreateItineraryRequest,
    ) -> Result<Itinerary, ApiError> {
        let entry = sqlx::query_as::<_, Itinerary>(&format!(
            r#"
            INSERT INTO itineraries (trip_id, day_number, location, activity, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ITINERARY_COLUMNS
        ))
        .bind(trip_id)
        .bind(req.day_number)
        .bind(&req.location)
        .bind(&req.activity)
        .bind(&req.notes)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create itinerary for trip {}: {}", trip_id, e);
            ApiError::Database(e.to_string())
        })?;

        log::info!("Created itinerary {} on trip {}", entry.id, trip_id);
        Ok(entry)
    }

    /// Persist a merged entry; same load-merge-save convention as trips.
    pub async fn save(pool: &PgPool, entry: &Itinerary) -> Result<Itinerary, ApiError> {
        sqlx::query_as::<_, Itinerary>(&format!(
            r#"
            UPDATE itineraries
            SET day_number = $1,
                location = $2,
                activity = $3,
                notes = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            ITINERARY_COLUMNS
        ))
        .bind(entry.day_number)
        .bind(&entry.location)
        .bind(&entry.activity)
        .bind(&entry.notes)
        .bind(entry.id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to save itinerary {}: {}", entry.id, e);
            ApiError::Database(e.to_string())
        })
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, ApiError> {
        let rows = sqlx::query("DELETE FROM itineraries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete itinerary {}: {}", id, e);
                ApiError::Database(e.to_string())
            })?
            .rows_affected();

        if rows > 0 {
            log::info!("Deleted itinerary {}", id);
        }
        Ok(rows)
    }
}
