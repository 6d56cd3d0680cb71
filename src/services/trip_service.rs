// src/services/trip_service.rs
// DOCUMENTATION: Business logic for trips
// PURPOSE: Owner-scoped trip CRUD plus plan regeneration through the
// injected generator

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::TripRepository;
use crate::errors::ApiError;
use crate::models::{CreateTripRequest, Trip, UpdateTripRequest};
use crate::services::ownership::require_owned_trip;
use crate::services::plan_generator::{build_trip_prompt, extract_budget, PlanGenerator};
use crate::validation::date_order;

pub struct TripService;

impl TripService {
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<Trip>, ApiError> {
        TripRepository::list_by_user(pool, user_id).await
    }

    /// A trip owned by someone else looks exactly like a missing one.
    pub async fn get(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Trip, ApiError> {
        require_owned_trip(pool, id, user_id).await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateTripRequest,
    ) -> Result<Trip, ApiError> {
        TripRepository::create(pool, user_id, &req).await
    }

    /// Merge the update into the stored row, then persist the whole row.
    /// The date range is re-checked on the merged values because either
    /// endpoint may come from storage rather than the request.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        req: UpdateTripRequest,
    ) -> Result<Trip, ApiError> {
        let mut trip = Self::get(pool, id, user_id).await?;
        trip.apply(req);

        if let Err(error) = date_order(trip.start_date, trip.end_date) {
            let message = error
                .message
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid date range".to_string());
            return Err(ApiError::ValidationError(message));
        }

        TripRepository::save(pool, &trip).await
    }

    /// Deleting twice is fine; the second call simply removes nothing.
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        let rows = TripRepository::delete(pool, id, user_id).await?;
        if rows == 0 {
            log::debug!("Delete of trip {} removed nothing", id);
        }
        Ok(())
    }

    /// Re-run AI enrichment for an existing trip: rebuild the prompt from
    /// the stored row, persist the fresh plan, and replace the budget when
    /// one can be read out of the generated text.
    pub async fn regenerate_plan(
        pool: &PgPool,
        generator: &dyn PlanGenerator,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Trip, ApiError> {
        let mut trip = Self::get(pool, id, user_id).await?;

        let prompt = build_trip_prompt(
            &trip.title,
            &trip.city,
            &trip.start_date.to_string(),
            &trip.end_date.to_string(),
        );
        let plan = generator.generate(&prompt).await?;

        if let Some(budget) = extract_budget(&plan) {
            trip.total_budget = budget;
        } else {
            log::warn!("Generated plan for trip {} carried no readable budget", id);
        }
        trip.generated_plan = Some(plan);

        TripRepository::save(pool, &trip).await
    }
}
