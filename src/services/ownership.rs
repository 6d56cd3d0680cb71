// src/services/ownership.rs
// DOCUMENTATION: Owner-scoped trip resolution
// PURPOSE: The one gate every trip-scoped operation passes through before
// touching rows; non-owned and absent ids are indistinguishable to callers

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::TripRepository;
use crate::errors::ApiError;
use crate::models::Trip;

/// Source of owner-scoped trip lookups. Production uses the pool-backed
/// implementation below; tests inject a canned store.
#[async_trait]
pub trait TripOwnership: Send + Sync {
    /// The trip, only if it belongs to the given user.
    async fn owned_trip(&self, id: Uuid, user_id: Uuid) -> Result<Option<Trip>, ApiError>;
}

#[async_trait]
impl TripOwnership for PgPool {
    async fn owned_trip(&self, id: Uuid, user_id: Uuid) -> Result<Option<Trip>, ApiError> {
        TripRepository::get_owned(self, id, user_id).await
    }
}

/// Resolve a trip the caller must own. Absent ids and ids owned by someone
/// else collapse to the same NotFound; the taxonomy has no Forbidden.
pub async fn require_owned_trip(
    store: &dyn TripOwnership,
    id: Uuid,
    user_id: Uuid,
) -> Result<Trip, ApiError> {
    store
        .owned_trip(id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    /// Canned store holding one trip, scoped the way the SQL is: a lookup
    /// only resolves when both the id and the owner match.
    struct SingleTripStore {
        trip: Trip,
    }

    #[async_trait]
    impl TripOwnership for SingleTripStore {
        async fn owned_trip(&self, id: Uuid, user_id: Uuid) -> Result<Option<Trip>, ApiError> {
            if self.trip.id == id && self.trip.user_id == user_id {
                Ok(Some(self.trip.clone()))
            } else {
                Ok(None)
            }
        }
    }

    fn store_with_trip(id: Uuid, user_id: Uuid) -> SingleTripStore {
        SingleTripStore {
            trip: Trip {
                id,
                user_id,
                title: "Bali Getaway".to_string(),
                city: "Denpasar".to_string(),
                start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
                total_budget: 5_000_000,
                generated_plan: None,
                photo_reference: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        }
    }

    #[tokio::test]
    async fn owner_resolves_their_trip() {
        let trip_id = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let store = store_with_trip(trip_id, owner);

        let trip = require_owned_trip(&store, trip_id, owner).await.unwrap();
        assert_eq!(trip.id, trip_id);
        assert_eq!(trip.user_id, owner);
    }

    #[tokio::test]
    async fn foreign_trip_reads_as_not_found() {
        let trip_id = Uuid::new_v4();
        let store = store_with_trip(trip_id, Uuid::new_v4());

        let other_user = Uuid::new_v4();
        let err = require_owned_trip(&store, trip_id, other_user)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Trip not found"));
    }

    #[tokio::test]
    async fn absent_trip_reads_as_not_found() {
        let owner = Uuid::new_v4();
        let store = store_with_trip(Uuid::new_v4(), owner);

        let err = require_owned_trip(&store, Uuid::new_v4(), owner)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Trip not found"));
    }
}
