// src/models/itinerary.rs
// DOCUMENTATION: Itinerary entry models
// PURPOSE: Database row for itineraries plus create/update DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// One planned activity on a given day of a trip. Day numbers are
/// 1-based and not required to be unique or contiguous within a trip.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Itinerary {
    pub id: Uuid,

    #[serde(rename = "tripId")]
    pub trip_id: Uuid,

    #[serde(rename = "dayNumber")]
    pub day_number: i32,

    pub location: String,

    pub activity: String,

    pub notes: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /trips/{tripId}/itineraries
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItineraryRequest {
    #[serde(rename = "dayNumber")]
    #[validate(range(min = 1, message = "Day number must be at least 1"))]
    pub day_number: i32,

    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: String,

    #[validate(length(min = 1, message = "Activity cannot be empty"))]
    pub activity: String,

    pub notes: Option<String>,
}

/// Request DTO for PUT /itineraries/{id}; omitted fields are preserved.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateItineraryRequest {
    #[serde(rename = "dayNumber")]
    #[validate(range(min = 1, message = "Day number must be at least 1"))]
    pub day_number: Option<i32>,

    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: Option<String>,

    #[validate(length(min = 1, message = "Activity cannot be empty"))]
    pub activity: Option<String>,

    pub notes: Option<String>,
}

impl Itinerary {
    pub fn apply(&mut self, update: UpdateItineraryRequest) {
        if let Some(day_number) = update.day_number {
            self.day_number = day_number;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(activity) = update.activity {
            self.activity = activity;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::first_validation_message;

    #[test]
    fn zero_day_number_is_rejected() {
        let req = CreateItineraryRequest {
            day_number: 0,
            location: "Ubud".to_string(),
            activity: "Rice terrace walk".to_string(),
            notes: None,
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(
            first_validation_message(&errors),
            "Day number must be at least 1"
        );
    }

    #[test]
    fn empty_activity_is_rejected() {
        let req = CreateItineraryRequest {
            day_number: 1,
            location: "Ubud".to_string(),
            activity: String::new(),
            notes: None,
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(first_validation_message(&errors), "Activity cannot be empty");
    }

    #[test]
    fn apply_preserves_notes_when_only_activity_changes() {
        let mut entry = Itinerary {
            id: Uuid::new_v4(),
            trip_id: Uuid::new_v4(),
            day_number: 2,
            location: "Seminyak".to_string(),
            activity: "Surf lesson".to_string(),
            notes: Some("Bring sunscreen".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        entry.apply(UpdateItineraryRequest {
            activity: Some("Sunset dinner".to_string()),
            ..Default::default()
        });

        assert_eq!(entry.activity, "Sunset dinner");
        assert_eq!(entry.notes.as_deref(), Some("Bring sunscreen"));
        assert_eq!(entry.day_number, 2);
    }
}
