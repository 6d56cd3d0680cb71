// src/models/budget_item.rs
// DOCUMENTATION: Budget item models
// PURPOSE: Database row for budget_items plus create/update DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A single expense line attached to a trip. Amounts are integers in the
/// smallest currency unit, same as the trip budget.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BudgetItem {
    pub id: Uuid,

    #[serde(rename = "tripId")]
    pub trip_id: Uuid,

    pub category: String,

    pub notes: Option<String>,

    pub amount: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /trips/{tripId}/budget-items
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBudgetItemRequest {
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: String,

    pub notes: Option<String>,

    #[validate(range(min = 0, message = "Amount must be at least 0"))]
    pub amount: i64,
}

/// Request DTO for PUT /budget-items/{id}; omitted fields are preserved.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateBudgetItemRequest {
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,

    pub notes: Option<String>,

    #[validate(range(min = 0, message = "Amount must be at least 0"))]
    pub amount: Option<i64>,
}

impl BudgetItem {
    pub fn apply(&mut self, update: UpdateBudgetItemRequest) {
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::first_validation_message;

    #[test]
    fn empty_category_is_rejected() {
        let req = CreateBudgetItemRequest {
            category: String::new(),
            notes: None,
            amount: 100_000,
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(first_validation_message(&errors), "Category cannot be empty");
    }

    #[test]
    fn negative_amount_is_rejected() {
        let req = CreateBudgetItemRequest {
            category: "Food".to_string(),
            notes: None,
            amount: -500,
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(
            first_validation_message(&errors),
            "Amount must be at least 0"
        );
    }

    #[test]
    fn apply_merges_amount_and_keeps_category() {
        let mut item = BudgetItem {
            id: Uuid::new_v4(),
            trip_id: Uuid::new_v4(),
            category: "Transport".to_string(),
            notes: Some("Airport taxi".to_string()),
            amount: 150_000,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        item.apply(UpdateBudgetItemRequest {
            amount: Some(175_000),
            ..Default::default()
        });

        assert_eq!(item.category, "Transport");
        assert_eq!(item.amount, 175_000);
        assert_eq!(item.notes.as_deref(), Some("Airport taxi"));
    }
}
