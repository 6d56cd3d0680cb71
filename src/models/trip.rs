// src/models/trip.rs
// DOCUMENTATION: Trip models
// PURPOSE: Database row for trips plus create/update request DTOs with
// validation mirroring the persistence constraints

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::validation::date_order;

/// A trip owned by a single user. Dates are calendar dates (no time
/// component); `total_budget` is an integer amount in the smallest
/// currency unit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,

    #[serde(rename = "userId")]
    pub user_id: Uuid,

    pub title: String,

    pub city: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    pub total_budget: i64,

    /// AI-generated plan text, if one has been produced for this trip
    pub generated_plan: Option<String>,

    /// Google photo reference for the trip's cover image
    #[serde(rename = "photoReference")]
    pub photo_reference: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

fn validate_trip_dates(req: &CreateTripRequest) -> Result<(), ValidationError> {
    date_order(req.start_date, req.end_date)
}

/// Request DTO for POST /trips
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_trip_dates", skip_on_field_errors = true))]
pub struct CreateTripRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,

    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(range(min = 0, message = "Total budget must be at least 0"))]
    pub total_budget: i64,

    pub generated_plan: Option<String>,

    #[serde(rename = "photoReference")]
    pub photo_reference: Option<String>,
}

/// Request DTO for PUT /trips/{id}. Every field is optional; omitted
/// fields keep their stored values. Date ordering is re-checked against
/// the merged row, not here, because either endpoint of the range may
/// come from storage.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTripRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 0, message = "Total budget must be at least 0"))]
    pub total_budget: Option<i64>,

    pub generated_plan: Option<String>,

    #[serde(rename = "photoReference")]
    pub photo_reference: Option<String>,
}

impl Trip {
    /// DOCUMENTATION: Merges an update request into this row. Fields absent
    /// from the request keep their current values. The caller re-validates
    /// the merged date range before persisting.
    pub fn apply(&mut self, update: UpdateTripRequest) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(total_budget) = update.total_budget {
            self.total_budget = total_budget;
        }
        if let Some(generated_plan) = update.generated_plan {
            self.generated_plan = Some(generated_plan);
        }
        if let Some(photo_reference) = update.photo_reference {
            self.photo_reference = Some(photo_reference);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::first_validation_message;

    fn base_request() -> CreateTripRequest {
        CreateTripRequest {
            title: "Bali Getaway".to_string(),
            city: "Denpasar".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
            total_budget: 5_000_000,
            generated_plan: None,
            photo_reference: None,
        }
    }

    fn sample_trip() -> Trip {
        Trip {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Bali Getaway".to_string(),
            city: "Denpasar".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
            total_budget: 5_000_000,
            generated_plan: None,
            photo_reference: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut req = base_request();
        req.title = String::new();
        let errors = req.validate().unwrap_err();
        assert_eq!(first_validation_message(&errors), "Title cannot be empty");
    }

    #[test]
    fn negative_budget_is_rejected() {
        let mut req = base_request();
        req.total_budget = -1;
        let errors = req.validate().unwrap_err();
        assert_eq!(
            first_validation_message(&errors),
            "Total budget must be at least 0"
        );
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut req = base_request();
        req.end_date = NaiveDate::from_ymd_opt(2025, 5, 30).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(
            first_validation_message(&errors),
            "End date must be after start date"
        );
    }

    #[test]
    fn same_day_trip_is_allowed() {
        let mut req = base_request();
        req.end_date = req.start_date;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn apply_merges_only_provided_fields() {
        let mut trip = sample_trip();
        let original_city = trip.city.clone();
        let original_budget = trip.total_budget;

        trip.apply(UpdateTripRequest {
            title: Some("Bali Revisited".to_string()),
            ..Default::default()
        });

        assert_eq!(trip.title, "Bali Revisited");
        assert_eq!(trip.city, original_city);
        assert_eq!(trip.total_budget, original_budget);
    }

    #[test]
    fn apply_keeps_existing_plan_when_absent() {
        let mut trip = sample_trip();
        trip.generated_plan = Some("Day 1: beach".to_string());

        trip.apply(UpdateTripRequest {
            total_budget: Some(7_500_000),
            ..Default::default()
        });

        assert_eq!(trip.generated_plan.as_deref(), Some("Day 1: beach"));
        assert_eq!(trip.total_budget, 7_500_000);
    }
}
