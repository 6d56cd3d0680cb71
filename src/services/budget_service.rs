// src/services/budget_service.rs
// DOCUMENTATION: Business logic for budget items
// PURPOSE: Expense lines nested under a trip, ownership enforced the same
// way as itinerary entries

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::BudgetItemRepository;
use crate::errors::ApiError;
use crate::models::{BudgetItem, CreateBudgetItemRequest, UpdateBudgetItemRequest};
use crate::services::ownership::require_owned_trip;

pub struct BudgetService;

impl BudgetService {
    pub async fn list(
        pool: &PgPool,
        trip_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<BudgetItem>, ApiError> {
        require_owned_trip(pool, trip_id, user_id).await?;
        BudgetItemRepository::list_by_trip(pool, trip_id).await
    }

    pub async fn create(
        pool: &PgPool,
        trip_id: Uuid,
        user_id: Uuid,
        req: CreateBudgetItemRequest,
    ) -> Result<BudgetItem, ApiError> {
        require_owned_trip(pool, trip_id, user_id).await?;
        BudgetItemRepository::create(pool, trip_id, &req).await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        req: UpdateBudgetItemRequest,
    ) -> Result<BudgetItem, ApiError> {
        let mut item = BudgetItemRepository::get_owned(pool, id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Budget item not found".to_string()))?;

        item.apply(req);
        BudgetItemRepository::save(pool, &item).await
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        BudgetItemRepository::get_owned(pool, id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Budget item not found".to_string()))?;

        let rows = BudgetItemRepository::delete(pool, id).await?;
        if rows == 0 {
            return Err(ApiError::NotFound("Budget item not found".to_string()));
        }
        Ok(())
    }
}
