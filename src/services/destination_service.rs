// src/services/destination_service.rs
// DOCUMENTATION: Business logic for the destination catalog
// PURPOSE: Public browsing, authenticated curation, and persisting Google
// place lookups into the catalog

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::DestinationRepository;
use crate::errors::ApiError;
use crate::models::{CreateDestinationRequest, DestinationResponse, UpdateDestinationRequest};
use crate::services::places_client::GooglePlacesClient;

pub struct DestinationService;

impl DestinationService {
    /// The catalog is shared: browsing needs no account.
    pub async fn list(pool: &PgPool) -> Result<Vec<DestinationResponse>, ApiError> {
        DestinationRepository::list_all(pool).await
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<DestinationResponse, ApiError> {
        DestinationRepository::get_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Destination not found".to_string()))
    }

    pub async fn create(
        pool: &PgPool,
        req: CreateDestinationRequest,
    ) -> Result<DestinationResponse, ApiError> {
        DestinationRepository::create(pool, &req).await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: UpdateDestinationRequest,
    ) -> Result<DestinationResponse, ApiError> {
        DestinationRepository::update(pool, id, &req).await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = DestinationRepository::delete(pool, id).await?;
        if rows == 0 {
            return Err(ApiError::NotFound("Destination not found".to_string()));
        }
        Ok(())
    }

    /// Import a Google place into the catalog. Looked-up data is mapped to
    /// a create request and upserted by google_place_id, so importing the
    /// same place twice refreshes it instead of duplicating it. Returns the
    /// row and whether it was newly created.
    pub async fn import_google_place(
        pool: &PgPool,
        places: &GooglePlacesClient,
        place_id: &str,
    ) -> Result<(DestinationResponse, bool), ApiError> {
        let details = places.typed_place_details(place_id).await?;
        let req = GooglePlacesClient::to_import_request(&details);

        let (destination, created) = DestinationRepository::upsert_google_place(pool, &req).await?;
        log::info!(
            "Imported place {} as destination {} ({})",
            place_id,
            destination.destination.id,
            if created { "created" } else { "updated" }
        );

        Ok((destination, created))
    }
}
