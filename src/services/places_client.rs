// src/services/places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Proxy text search, place details and photo bytes for the browser
// so the API key never leaves the server; JSON lookups go through the TTL
// cache, and detail lookups can be mapped into a destination import

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ApiError;
use crate::models::{CreateDestinationRequest, DestinationDetailInput};
use crate::services::cache::PlacesCache;

/// Fields requested from the details endpoint; everything the browser's
/// detail page renders plus what an import needs.
const DETAILS_FIELDS: &str = "place_id,name,geometry,formatted_address,\
formatted_phone_number,international_phone_number,website,rating,\
user_ratings_total,opening_hours,photos,url,types";

/// Typed subset of a Place Details result, parsed only for imports.
/// The proxy endpoints pass Google's JSON through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct GooglePlaceDetails {
    pub place_id: String,
    pub name: String,
    pub geometry: Option<PlaceGeometry>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f32>,
    pub user_ratings_total: Option<i32>,
    pub opening_hours: Option<PlaceOpeningHours>,
    pub photos: Option<Vec<PlacePhoto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceGeometry {
    pub location: PlaceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOpeningHours {
    /// One display line per weekday ("Monday: 06:30 - 16:30")
    pub weekday_text: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacePhoto {
    pub photo_reference: String,
}

/// Check the `status` field Google embeds in every JSON response.
/// ZERO_RESULTS is a valid answer, not a failure.
fn check_google_status(body: &Value) -> Result<(), ApiError> {
    let status = body
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("MISSING_STATUS");

    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => {
            let message = body
                .get("error_message")
                .and_then(Value::as_str)
                .unwrap_or(other);
            log::error!("Google Places API status {}: {}", other, message);
            Err(ApiError::ExternalApi(message.to_string()))
        }
    }
}

/// Google Places API client
/// DOCUMENTATION: Handles authentication and API calls to Google Places
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Places API key
    api_key: String,
    /// Base URL for Google Places API
    base_url: String,
    /// Shared TTL cache for search and details responses
    cache: Arc<PlacesCache>,
}

impl GooglePlacesClient {
    pub fn new(api_key: String, cache: Arc<PlacesCache>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
            cache,
        }
    }

    /// Text search, returned exactly as Google shaped it.
    /// DOCUMENTATION: Cached by normalized query; only healthy responses
    /// are cached so an upstream failure never gets pinned for the TTL.
    pub async fn text_search(&self, query: &str) -> Result<Value, ApiError> {
        let cache_key = PlacesCache::search_key(query);
        if let Some(hit) = self.cache.get(&cache_key).await {
            log::debug!("Places cache hit: {}", cache_key);
            return parse_cached(&hit);
        }

        let url = format!("{}/textsearch/json", self.base_url);
        let body = self
            .fetch_json(&url, &[("query", query), ("key", &self.api_key)])
            .await?;
        check_google_status(&body)?;

        self.cache.set(cache_key, body.to_string()).await;
        Ok(body)
    }

    /// Place details, returned exactly as Google shaped it.
    pub async fn place_details(&self, place_id: &str) -> Result<Value, ApiError> {
        let cache_key = PlacesCache::details_key(place_id);
        if let Some(hit) = self.cache.get(&cache_key).await {
            log::debug!("Places cache hit: {}", cache_key);
            return parse_cached(&hit);
        }

        let url = format!("{}/details/json", self.base_url);
        let body = self
            .fetch_json(
                &url,
                &[
                    ("place_id", place_id),
                    ("fields", DETAILS_FIELDS),
                    ("key", &self.api_key),
                ],
            )
            .await?;
        check_google_status(&body)?;

        self.cache.set(cache_key, body.to_string()).await;
        Ok(body)
    }

    /// Place details parsed into the typed subset the import flow maps from.
    pub async fn typed_place_details(
        &self,
        place_id: &str,
    ) -> Result<GooglePlaceDetails, ApiError> {
        let body = self.place_details(place_id).await?;
        let result = body.get("result").cloned().ok_or_else(|| {
            log::error!("Place details response missing result object");
            ApiError::ExternalApi("Details response missing result".to_string())
        })?;

        serde_json::from_value(result).map_err(|e| {
            log::error!("Failed to parse place details result: {}", e);
            ApiError::ExternalApi(format!("Parse error: {}", e))
        })
    }

    /// Fetch photo bytes for relaying to the browser.
    /// DOCUMENTATION: Returns the upstream content type alongside the bytes;
    /// relaying instead of redirecting keeps the API key out of the URL the
    /// browser sees.
    pub async fn fetch_photo(
        &self,
        photo_reference: &str,
        max_width: Option<u32>,
    ) -> Result<(String, Vec<u8>), ApiError> {
        let width = max_width.unwrap_or(800);
        let url = format!("{}/photo", self.base_url);

        log::debug!("Google Places photo fetch: maxwidth={}", width);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("maxwidth", width.to_string().as_str()),
                ("photoreference", photo_reference),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| {
                log::error!("Google Places photo request failed: {}", e);
                ApiError::ExternalApi(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            log::error!("Google Places photo error: {}", status);
            return Err(ApiError::ExternalApi(format!("Photo error {}", status)));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        let bytes = response.bytes().await.map_err(|e| {
            log::error!("Failed to read photo bytes: {}", e);
            ApiError::ExternalApi(format!("Read error: {}", e))
        })?;

        Ok((content_type, bytes.to_vec()))
    }

    /// URL of our own image relay for a photo reference, stored on imported
    /// destinations so `<img>` tags go through this service.
    pub fn photo_relay_url(photo_reference: &str) -> String {
        format!("/places/images?photoReference={}", photo_reference)
    }

    /// Map a typed details result to a destination create request.
    /// DOCUMENTATION: The detail record carries every enrichment field
    /// Google returned; weekday lines are joined into one display block.
    pub fn to_import_request(details: &GooglePlaceDetails) -> CreateDestinationRequest {
        let (latitude, longitude) = match &details.geometry {
            Some(geometry) => (Some(geometry.location.lat), Some(geometry.location.lng)),
            None => (None, None),
        };

        let image_url = details
            .photos
            .as_ref()
            .and_then(|photos| photos.first())
            .map(|photo| Self::photo_relay_url(&photo.photo_reference));

        let opening_hours = details
            .opening_hours
            .as_ref()
            .and_then(|hours| hours.weekday_text.as_ref())
            .map(|lines| lines.join("\n"));

        // Prefer the locally formatted number, as the original importer did
        let phone_number = details
            .formatted_phone_number
            .clone()
            .or_else(|| details.international_phone_number.clone());

        CreateDestinationRequest {
            name: details.name.clone(),
            google_place_id: Some(details.place_id.clone()),
            latitude,
            longitude,
            image_url,
            detail: Some(DestinationDetailInput {
                address: details.formatted_address.clone(),
                phone_number,
                website: details.website.clone(),
                opening_hours,
                rating: details.rating,
                total_reviews: details.user_ratings_total,
            }),
        }
    }

    async fn fetch_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Google Places API request failed: {}", e);
                ApiError::ExternalApi(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Google Places API error {}: {}", status, body);
            return Err(ApiError::ExternalApi(format!("API error {}", status)));
        }

        response.json::<Value>().await.map_err(|e| {
            log::error!("Failed to parse Google Places response: {}", e);
            ApiError::ExternalApi(format!("Parse error: {}", e))
        })
    }
}

fn parse_cached(raw: &str) -> Result<Value, ApiError> {
    serde_json::from_str(raw).map_err(|e| {
        log::error!("Corrupt cache entry: {}", e);
        ApiError::Internal("Cache entry was not valid JSON".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_details() -> GooglePlaceDetails {
        GooglePlaceDetails {
            place_id: "ChIJl9HQn1ZXei4RqEXzeVg9PRM".to_string(),
            name: "Borobudur Temple".to_string(),
            geometry: Some(PlaceGeometry {
                location: PlaceLocation {
                    lat: -7.6079,
                    lng: 110.2038,
                },
            }),
            formatted_address: Some("Jl. Badrawati, Magelang".to_string()),
            formatted_phone_number: Some("(0293) 788266".to_string()),
            international_phone_number: Some("+62 293 788266".to_string()),
            website: Some("https://borobudurpark.com".to_string()),
            rating: Some(4.7),
            user_ratings_total: Some(51_234),
            opening_hours: Some(PlaceOpeningHours {
                weekday_text: Some(vec![
                    "Monday: 06:30 - 16:30".to_string(),
                    "Tuesday: 06:30 - 16:30".to_string(),
                ]),
            }),
            photos: Some(vec![PlacePhoto {
                photo_reference: "ref-abc".to_string(),
            }]),
        }
    }

    #[test]
    fn test_to_import_request() {
        let request = GooglePlacesClient::to_import_request(&sample_details());

        assert_eq!(request.name, "Borobudur Temple");
        assert_eq!(
            request.google_place_id.as_deref(),
            Some("ChIJl9HQn1ZXei4RqEXzeVg9PRM")
        );
        assert_eq!(request.latitude, Some(-7.6079));
        assert_eq!(request.longitude, Some(110.2038));
        assert_eq!(
            request.image_url.as_deref(),
            Some("/places/images?photoReference=ref-abc")
        );

        let detail = request.detail.expect("import carries a detail record");
        assert_eq!(detail.address.as_deref(), Some("Jl. Badrawati, Magelang"));
        // Locally formatted number wins over the international one
        assert_eq!(detail.phone_number.as_deref(), Some("(0293) 788266"));
        assert_eq!(detail.website.as_deref(), Some("https://borobudurpark.com"));
        assert_eq!(
            detail.opening_hours.as_deref(),
            Some("Monday: 06:30 - 16:30\nTuesday: 06:30 - 16:30")
        );
        assert_eq!(detail.rating, Some(4.7));
        assert_eq!(detail.total_reviews, Some(51_234));
    }

    #[test]
    fn test_import_request_with_bare_result() {
        let details = GooglePlaceDetails {
            place_id: "ChIJbare".to_string(),
            name: "Unnamed Beach".to_string(),
            geometry: None,
            formatted_address: None,
            formatted_phone_number: None,
            international_phone_number: Some("+62 811 000 111".to_string()),
            website: None,
            rating: None,
            user_ratings_total: None,
            opening_hours: None,
            photos: None,
        };

        let request = GooglePlacesClient::to_import_request(&details);

        assert_eq!(request.latitude, None);
        assert_eq!(request.image_url, None);
        let detail = request.detail.expect("detail record is always present");
        assert_eq!(detail.phone_number.as_deref(), Some("+62 811 000 111"));
        assert!(detail.opening_hours.is_none());
    }

    #[test]
    fn test_status_check_accepts_ok_and_zero_results() {
        assert!(check_google_status(&json!({ "status": "OK" })).is_ok());
        assert!(check_google_status(&json!({ "status": "ZERO_RESULTS" })).is_ok());
    }

    #[test]
    fn test_status_check_surfaces_error_message() {
        let body = json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        });
        let err = check_google_status(&body).unwrap_err();
        assert!(
            matches!(err, ApiError::ExternalApi(ref msg) if msg == "The provided API key is invalid.")
        );
    }

    #[test]
    fn test_status_check_rejects_missing_status() {
        assert!(check_google_status(&json!({ "results": [] })).is_err());
    }

    #[test]
    fn test_details_result_parses_from_google_shape() {
        let result = json!({
            "place_id": "ChIJ123",
            "name": "Malioboro Street",
            "geometry": { "location": { "lat": -7.7926, "lng": 110.3657 } },
            "formatted_address": "Jl. Malioboro, Yogyakarta",
            "rating": 4.5,
            "user_ratings_total": 120_000,
            "opening_hours": { "open_now": true, "weekday_text": ["Monday: Open 24 hours"] },
            "photos": [{ "photo_reference": "ref-1", "width": 800 }],
            "types": ["tourist_attraction"]
        });

        let details: GooglePlaceDetails = serde_json::from_value(result).unwrap();
        assert_eq!(details.name, "Malioboro Street");
        assert_eq!(details.photos.unwrap()[0].photo_reference, "ref-1");
        assert_eq!(
            details.opening_hours.unwrap().weekday_text.unwrap()[0],
            "Monday: Open 24 hours"
        );
    }

    #[test]
    fn test_photo_relay_url() {
        assert_eq!(
            GooglePlacesClient::photo_relay_url("abc123"),
            "/places/images?photoReference=abc123"
        );
    }
}
