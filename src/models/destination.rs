// src/models/destination.rs
// DOCUMENTATION: Destination catalog models
// PURPOSE: Database rows for destinations and their optional detail record,
// plus request/response DTOs for the catalog endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A browsable destination in the shared catalog
/// DOCUMENTATION: Maps directly to the destinations table. Coordinates and
/// the Google place binding are optional; hand-entered destinations carry
/// neither.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Destination {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Display name (required)
    pub name: String,

    /// Google Places unique identifier (used for import deduplication)
    #[serde(rename = "googlePlaceId")]
    pub google_place_id: Option<String>,

    /// Geographic coordinates
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Cover image URL
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Enrichment record owned by exactly one destination
/// DOCUMENTATION: Maps to the destination_details table; every column is
/// optional because imports only carry what Google returned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DestinationDetail {
    pub id: Uuid,

    #[serde(rename = "destinationId")]
    pub destination_id: Uuid,

    /// Physical street address
    pub address: Option<String>,

    /// Contact number, digits and separators only
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,

    /// Website URL
    pub website: Option<String>,

    /// Opening hours as display text, one line per weekday
    #[serde(rename = "openingHours")]
    pub opening_hours: Option<String>,

    /// Aggregate rating (0-5)
    pub rating: Option<f32>,

    /// Number of reviews behind the rating
    #[serde(rename = "totalReviews")]
    pub total_reviews: Option<i32>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Response DTO combining a destination with its detail record
/// DOCUMENTATION: Browsing endpoints always return the pair; `detail` is
/// null for destinations without an enrichment row.
#[derive(Debug, Serialize)]
pub struct DestinationResponse {
    #[serde(flatten)]
    pub destination: Destination,
    pub detail: Option<DestinationDetail>,
}

/// Detail payload nested inside create/update destination requests
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DestinationDetailInput {
    pub address: Option<String>,

    #[serde(rename = "phoneNumber")]
    #[validate(custom = "crate::validation::validate_phone")]
    pub phone_number: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    #[serde(rename = "openingHours")]
    pub opening_hours: Option<String>,

    #[validate(custom = "crate::validation::validate_rating")]
    pub rating: Option<f32>,

    #[serde(rename = "totalReviews")]
    #[validate(range(min = 0, message = "Total reviews must be at least 0"))]
    pub total_reviews: Option<i32>,
}

/// Request DTO for POST /destinations
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDestinationRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,

    #[serde(rename = "googlePlaceId")]
    pub google_place_id: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,

    /// Optional enrichment persisted alongside the destination
    #[validate]
    pub detail: Option<DestinationDetailInput>,
}

/// Request DTO for POST /destinations/import
#[derive(Debug, Deserialize, Validate)]
pub struct ImportDestinationRequest {
    /// Google Place ID to look up and persist
    #[serde(rename = "placeId")]
    #[validate(length(min = 1, message = "placeId is required"))]
    pub place_id: String,
}

/// Request DTO for PUT /destinations/{id}
/// DOCUMENTATION: Omitted scalar fields keep their stored values. A supplied
/// `detail` replaces the whole detail record.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDestinationRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,

    #[validate]
    pub detail: Option<DestinationDetailInput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::first_validation_message;

    fn base_request() -> CreateDestinationRequest {
        CreateDestinationRequest {
            name: "Borobudur Temple".to_string(),
            google_place_id: Some("ChIJl9HQn1ZXei4RqEXzeVg9PRM".to_string()),
            latitude: Some(-7.6079),
            longitude: Some(110.2038),
            image_url: None,
            detail: Some(DestinationDetailInput {
                address: Some("Jl. Badrawati, Magelang".to_string()),
                phone_number: Some("+62 293 788266".to_string()),
                website: Some("https://borobudurpark.com".to_string()),
                opening_hours: Some("Monday: 06:30 - 16:30".to_string()),
                rating: Some(4.7),
                total_reviews: Some(51_234),
            }),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut req = base_request();
        req.name = String::new();
        let errors = req.validate().unwrap_err();
        assert_eq!(first_validation_message(&errors), "Name cannot be empty");
    }

    #[test]
    fn nested_invalid_website_surfaces_its_message() {
        let mut req = base_request();
        if let Some(detail) = req.detail.as_mut() {
            detail.website = Some("not a url".to_string());
        }
        let errors = req.validate().unwrap_err();
        assert_eq!(
            first_validation_message(&errors),
            "Website must be a valid URL"
        );
    }

    #[test]
    fn nested_invalid_phone_surfaces_its_message() {
        let mut req = base_request();
        if let Some(detail) = req.detail.as_mut() {
            detail.phone_number = Some("call me maybe".to_string());
        }
        let errors = req.validate().unwrap_err();
        assert_eq!(
            first_validation_message(&errors),
            "Phone number must be valid"
        );
    }

    #[test]
    fn nested_out_of_range_rating_is_rejected() {
        let mut req = base_request();
        if let Some(detail) = req.detail.as_mut() {
            detail.rating = Some(5.5);
        }
        let errors = req.validate().unwrap_err();
        assert_eq!(first_validation_message(&errors), "Rating must be at most 5");
    }

    #[test]
    fn response_flattens_destination_fields() {
        let response = DestinationResponse {
            destination: Destination {
                id: Uuid::nil(),
                name: "Borobudur Temple".to_string(),
                google_place_id: None,
                latitude: None,
                longitude: None,
                image_url: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            detail: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["name"], "Borobudur Temple");
        assert!(json["detail"].is_null());
        assert!(json.get("destination").is_none());
    }
}
