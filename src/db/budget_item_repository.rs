// src/db/budget_item_repository.rs
// DOCUMENTATION: Database access for budget items
// PURPOSE: Per-trip expense lines, same ownership conventions as itineraries

use crate::errors::ApiError;
use crate::models::{BudgetItem, CreateBudgetItemRequest};
use sqlx::PgPool;
use uuid::Uuid;

const BUDGET_ITEM_COLUMNS: &str =
    "id, trip_id, category, notes, amount, created_at, updated_at";

pub struct BudgetItemRepository;

impl BudgetItemRepository {
    pub async fn list_by_trip(pool: &PgPool, trip_id: Uuid) -> Result<Vec<BudgetItem>, ApiError> {
        sqlx::query_as::<_, BudgetItem>(&format!(
            "SELECT {} FROM budget_items WHERE trip_id = $1 ORDER BY created_at ASC",
            BUDGET_ITEM_COLUMNS
        ))
        .bind(trip_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list budget items for trip {}: {}", trip_id, e);
            ApiError::Database(e.to_string())
        })
    }

    /// One item, only if its trip is owned by the given user.
    pub async fn get_owned(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<BudgetItem>, ApiError> {
        sqlx::query_as::<_, BudgetItem>(
            r#"
            SELECT b.id, b.trip_id, b.category, b.notes, b.amount,
                   b.created_at, b.updated_at
            FROM budget_items b
            JOIN trips t ON t.id = b.trip_id
            WHERE b.id = $1 AND t.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to load budget item {}: {}", id, e);
            ApiError::Database(e.to_string())
        })
    }

    pub async fn create(
        pool: &PgPool,
        trip_id: Uuid,
        req: &CreateBudgetItemRequest,
    ) -> Result<BudgetItem, ApiError> {
        let item = sqlx::query_as::<_, BudgetItem>(&format!(
            r#"
            INSERT INTO budget_items (trip_id, category, amount, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BUDGET_ITEM_COLUMNS
        ))
        .bind(trip_id)
        .bind(&req.category)
        .bind(req.amount)
        .bind(&req.notes)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create budget item for trip {}: {}", trip_id, e);
            ApiError::Database(e.to_string())
        })?;

        log::info!("Created budget item {} on trip {}", item.id, trip_id);
        Ok(item)
    }

    pub async fn save(pool: &PgPool, item: &BudgetItem) -> Result<BudgetItem, ApiError> {
        sqlx::query_as::<_, BudgetItem>(&format!(
            r#"
            UPDATE budget_items
            SET category = $1,
                amount = $2,
                notes = $3,
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            BUDGET_ITEM_COLUMNS
        ))
        .bind(&item.category)
        .bind(item.amount)
        .bind(&item.notes)
        .bind(item.id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to save budget item {}: {}", item.id, e);
            ApiError::Database(e.to_string())
        })
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, ApiError> {
        let rows = sqlx::query("DELETE FROM budget_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete budget item {}: {}", id, e);
                ApiError::Database(e.to_string())
            })?
            .rows_affected();

        if rows > 0 {
            log::info!("Deleted budget item {}", id);
        }
        Ok(rows)
    }
}
