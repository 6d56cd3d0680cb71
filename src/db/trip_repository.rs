// src/db/trip_repository.rs
// DOCUMENTATION: Database access for trips
// PURPOSE: Owner-scoped queries and the transactional cascade delete

use crate::errors::ApiError;
use crate::models::{CreateTripRequest, Trip};
use sqlx::PgPool;
use uuid::Uuid;

const TRIP_COLUMNS: &str = "id, user_id, title, city, start_date, end_date, total_budget, \
                            generated_plan, photo_reference, created_at, updated_at";

pub struct TripRepository;

impl TripRepository {
    /// All trips owned by a user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Trip>, ApiError> {
        sqlx::query_as::<_, Trip>(&format!(
            "SELECT {} FROM trips WHERE user_id = $1 ORDER BY created_at DESC",
            TRIP_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list trips for user {}: {}", user_id, e);
            ApiError::Database(e.to_string())
        })
    }

    /// One trip, only if it belongs to the given user. Non-owned ids look
    /// exactly like absent ids to the caller.
    pub async fn get_owned(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Trip>, ApiError> {
        sqlx::query_as::<_, Trip>(&format!(
            "SELECT {} FROM trips WHERE id = $1 AND user_id = $2",
            TRIP_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to load trip {}: {}", id, e);
            ApiError::Database(e.to_string())
        })
    }

    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: &CreateTripRequest,
    ) -> Result<Trip, ApiError> {
        let trip = sqlx::query_as::<_, Trip>(&format!(
            r#"
            INSERT INTO trips (user_id, title, city, start_date, end_date,
                               total_budget, generated_plan, photo_reference)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TRIP_COLUMNS
        ))
        .bind(user_id)
        .bind(&req.title)
        .bind(&req.city)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.total_budget)
        .bind(&req.generated_plan)
        .bind(&req.photo_reference)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create trip: {}", e);
            ApiError::Database(e.to_string())
        })?;

        log::info!("Created trip {} for user {}", trip.id, user_id);
        Ok(trip)
    }

    /// Persist a merged trip row. The service loads the current row, merges
    /// the supplied fields into it, and re-checks the date invariant before
    /// calling this; missing request fields therefore keep their old values.
    pub async fn save(pool: &PgPool, trip: &Trip) -> Result<Trip, ApiError> {
        sqlx::query_as::<_, Trip>(&format!(
            r#"
            UPDATE trips
            SET title = $1,
                city = $2,
                start_date = $3,
                end_date = $4,
                total_budget = $5,
                generated_plan = $6,
                photo_reference = $7,
                updated_at = NOW()
            WHERE id = $8
            RETURNING {}
            "#,
            TRIP_COLUMNS
        ))
        .bind(&trip.title)
        .bind(&trip.city)
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(trip.total_budget)
        .bind(&trip.generated_plan)
        .bind(&trip.photo_reference)
        .bind(trip.id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to save trip {}: {}", trip.id, e);
            ApiError::Database(e.to_string())
        })
    }

    /// Remove a trip and everything under it in one transaction. Returns
    /// the number of trip rows removed; zero is not an error, deleting an
    /// absent or non-owned id is a no-op.
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<u64, ApiError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open delete transaction: {}", e);
            ApiError::Database(e.to_string())
        })?;

        sqlx::query(
            "DELETE FROM itineraries WHERE trip_id IN \
             (SELECT id FROM trips WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Failed to delete itineraries of trip {}: {}", id, e);
            ApiError::Database(e.to_string())
        })?;

        sqlx::query(
            "DELETE FROM budget_items WHERE trip_id IN \
             (SELECT id FROM trips WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Failed to delete budget items of trip {}: {}", id, e);
            ApiError::Database(e.to_string())
        })?;

        let rows = sqlx::query("DELETE FROM trips WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Failed to delete trip {}: {}", id, e);
                ApiError::Database(e.to_string())
            })?
            .rows_affected();

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit delete of trip {}: {}", id, e);
            ApiError::Database(e.to_string())
        })?;

        if rows > 0 {
            log::info!("Deleted trip {} with its itineraries and budget items", id);
        }
        Ok(rows)
    }
}
