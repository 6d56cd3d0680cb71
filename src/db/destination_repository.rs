// src/db/destination_repository.rs
// DOCUMENTATION: Database access for destinations and their detail rows
// PURPOSE: Catalog queries with the detail record assembled in, plus the
// google_place_id upsert used by imports

use crate::errors::ApiError;
use crate::models::{
    CreateDestinationRequest, Destination, DestinationDetail, DestinationDetailInput,
    DestinationResponse, UpdateDestinationRequest,
};
use sqlx::{PgPool, Postgres};
use std::collections::HashMap;
use uuid::Uuid;

const DESTINATION_COLUMNS: &str =
    "id, name, google_place_id, latitude, longitude, image_url, created_at, updated_at";

const DETAIL_COLUMNS: &str = "id, destination_id, address, phone_number, website, \
                              opening_hours, rating, total_reviews, created_at, updated_at";

pub struct DestinationRepository;

impl DestinationRepository {
    /// Every destination with its detail record attached, oldest first.
    /// Details are fetched in one query and joined in memory.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<DestinationResponse>, ApiError> {
        let destinations = sqlx::query_as::<_, Destination>(&format!(
            "SELECT {} FROM destinations ORDER BY created_at ASC",
            DESTINATION_COLUMNS
        ))
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list destinations: {}", e);
            ApiError::Database(e.to_string())
        })?;

        let ids: Vec<Uuid> = destinations.iter().map(|d| d.id).collect();
        let details = sqlx::query_as::<_, DestinationDetail>(&format!(
            "SELECT {} FROM destination_details WHERE destination_id = ANY($1)",
            DETAIL_COLUMNS
        ))
        .bind(&ids)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list destination details: {}", e);
            ApiError::Database(e.to_string())
        })?;

        let mut by_destination: HashMap<Uuid, DestinationDetail> = details
            .into_iter()
            .map(|detail| (detail.destination_id, detail))
            .collect();

        Ok(destinations
            .into_iter()
            .map(|destination| {
                let detail = by_destination.remove(&destination.id);
                DestinationResponse {
                    destination,
                    detail,
                }
            })
            .collect())
    }

    pub async fn get_by_id(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<DestinationResponse>, ApiError> {
        let destination = sqlx::query_as::<_, Destination>(&format!(
            "SELECT {} FROM destinations WHERE id = $1",
            DESTINATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to load destination {}: {}", id, e);
            ApiError::Database(e.to_string())
        })?;

        let destination = match destination {
            Some(destination) => destination,
            None => return Ok(None),
        };

        let detail = Self::get_detail(pool, id).await?;
        Ok(Some(DestinationResponse {
            destination,
            detail,
        }))
    }

    async fn get_detail(
        pool: &PgPool,
        destination_id: Uuid,
    ) -> Result<Option<DestinationDetail>, ApiError> {
        sqlx::query_as::<_, DestinationDetail>(&format!(
            "SELECT {} FROM destination_details WHERE destination_id = $1",
            DETAIL_COLUMNS
        ))
        .bind(destination_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to load detail for destination {}: {}",
                destination_id,
                e
            );
            ApiError::Database(e.to_string())
        })
    }

    /// Insert a destination and, when supplied, its detail row in one
    /// transaction so a failed detail write never leaves a bare destination.
    pub async fn create(
        pool: &PgPool,
        req: &CreateDestinationRequest,
    ) -> Result<DestinationResponse, ApiError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open create transaction: {}", e);
            ApiError::Database(e.to_string())
        })?;

        let destination = sqlx::query_as::<_, Destination>(&format!(
            r#"
            INSERT INTO destinations (name, google_place_id, latitude, longitude, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            DESTINATION_COLUMNS
        ))
        .bind(&req.name)
        .bind(&req.google_place_id)
        .bind(req.latitude)
        .bind(req.longitude)
        .bind(&req.image_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Failed to create destination: {}", e);
            ApiError::Database(e.to_string())
        })?;

        let detail = match &req.detail {
            Some(input) => Some(Self::upsert_detail(&mut tx, destination.id, input).await?),
            None => None,
        };

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit destination create: {}", e);
            ApiError::Database(e.to_string())
        })?;

        log::info!("Created destination {}", destination.id);
        Ok(DestinationResponse {
            destination,
            detail,
        })
    }

    /// Partial update: omitted scalar fields keep their stored values, a
    /// supplied detail replaces the whole detail record.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateDestinationRequest,
    ) -> Result<DestinationResponse, ApiError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open update transaction: {}", e);
            ApiError::Database(e.to_string())
        })?;

        let destination = sqlx::query_as::<_, Destination>(&format!(
            r#"
            UPDATE destinations
            SET name = COALESCE($1, name),
                latitude = COALESCE($2, latitude),
                longitude = COALESCE($3, longitude),
                image_url = COALESCE($4, image_url),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            DESTINATION_COLUMNS
        ))
        .bind(&req.name)
        .bind(req.latitude)
        .bind(req.longitude)
        .bind(&req.image_url)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Failed to update destination {}: {}", id, e);
            ApiError::Database(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Destination not found".to_string()))?;

        let detail = match &req.detail {
            Some(input) => Some(Self::upsert_detail(&mut tx, id, input).await?),
            None => Self::get_detail_tx(&mut tx, id).await?,
        };

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit destination update: {}", e);
            ApiError::Database(e.to_string())
        })?;

        log::info!("Updated destination {}", id);
        Ok(DestinationResponse {
            destination,
            detail,
        })
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, ApiError> {
        // The detail row goes with it via ON DELETE CASCADE.
        let rows = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete destination {}: {}", id, e);
                ApiError::Database(e.to_string())
            })?
            .rows_affected();

        if rows > 0 {
            log::info!("Deleted destination {}", id);
        }
        Ok(rows)
    }

    /// Upsert a destination identified by its Google place id, refreshing
    /// the detail row with the latest lookup data. Returns the stored pair
    /// and whether a new destination row was created.
    pub async fn upsert_google_place(
        pool: &PgPool,
        req: &CreateDestinationRequest,
    ) -> Result<(DestinationResponse, bool), ApiError> {
        let google_id = req.google_place_id.as_ref().ok_or_else(|| {
            ApiError::BadRequest("googlePlaceId is required for import".to_string())
        })?;

        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open import transaction: {}", e);
            ApiError::Database(e.to_string())
        })?;

        // Insert first; on conflict fall through to an update so we can tell
        // the caller whether this import created the destination.
        let inserted = sqlx::query_as::<_, Destination>(&format!(
            r#"
            INSERT INTO destinations (name, google_place_id, latitude, longitude, image_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (google_place_id) DO NOTHING
            RETURNING {}
            "#,
            DESTINATION_COLUMNS
        ))
        .bind(&req.name)
        .bind(google_id)
        .bind(req.latitude)
        .bind(req.longitude)
        .bind(&req.image_url)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Failed to import place {}: {}", google_id, e);
            ApiError::Database(e.to_string())
        })?;

        let (destination, created) = match inserted {
            Some(destination) => (destination, true),
            None => {
                let updated = sqlx::query_as::<_, Destination>(&format!(
                    r#"
                    UPDATE destinations
                    SET name = $1,
                        latitude = $2,
                        longitude = $3,
                        image_url = COALESCE($4, image_url),
                        updated_at = NOW()
                    WHERE google_place_id = $5
                    RETURNING {}
                    "#,
                    DESTINATION_COLUMNS
                ))
                .bind(&req.name)
                .bind(req.latitude)
                .bind(req.longitude)
                .bind(&req.image_url)
                .bind(google_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    log::error!("Failed to refresh place {}: {}", google_id, e);
                    ApiError::Database(e.to_string())
                })?;
                (updated, false)
            }
        };

        let detail = match &req.detail {
            Some(input) => Some(Self::upsert_detail(&mut tx, destination.id, input).await?),
            None => Self::get_detail_tx(&mut tx, destination.id).await?,
        };

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit import of {}: {}", google_id, e);
            ApiError::Database(e.to_string())
        })?;

        log::info!(
            "Imported place {} as destination {} (created: {})",
            google_id,
            destination.id,
            created
        );
        Ok((
            DestinationResponse {
                destination,
                detail,
            },
            created,
        ))
    }

    async fn get_detail_tx(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        destination_id: Uuid,
    ) -> Result<Option<DestinationDetail>, ApiError> {
        sqlx::query_as::<_, DestinationDetail>(&format!(
            "SELECT {} FROM destination_details WHERE destination_id = $1",
            DETAIL_COLUMNS
        ))
        .bind(destination_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to load detail for destination {}: {}",
                destination_id,
                e
            );
            ApiError::Database(e.to_string())
        })
    }

    async fn upsert_detail(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        destination_id: Uuid,
        input: &DestinationDetailInput,
    ) -> Result<DestinationDetail, ApiError> {
        sqlx::query_as::<_, DestinationDetail>(&format!(
            r#"
            INSERT INTO destination_details
                (destination_id, address, phone_number, website, opening_hours,
                 rating, total_reviews)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (destination_id) DO UPDATE
            SET address = EXCLUDED.address,
                phone_number = EXCLUDED.phone_number,
                website = EXCLUDED.website,
                opening_hours = EXCLUDED.opening_hours,
                rating = EXCLUDED.rating,
                total_reviews = EXCLUDED.total_reviews,
                updated_at = NOW()
            RETURNING {}
            "#,
            DETAIL_COLUMNS
        ))
        .bind(destination_id)
        .bind(&input.address)
        .bind(&input.phone_number)
        .bind(&input.website)
        .bind(&input.opening_hours)
        .bind(input.rating)
        .bind(input.total_reviews)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to upsert detail for destination {}: {}",
                destination_id,
                e
            );
            ApiError::Database(e.to_string())
        })
    }
}
