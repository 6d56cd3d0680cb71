// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place proxying
// PURPOSE: Relay Google Places lookups and photo bytes to the browser
// without exposing the API key

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::auth::RequireAuth;
use crate::errors::ApiError;
use crate::services::GooglePlacesClient;

#[derive(Debug, Deserialize)]
pub struct SearchPlacesQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetailsQuery {
    #[serde(rename = "placeId")]
    pub place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceImageQuery {
    #[serde(rename = "photoReference")]
    pub photo_reference: Option<String>,
    pub maxwidth: Option<u32>,
}

/// GET /places?query=
pub async fn search_places(
    places: web::Data<GooglePlacesClient>,
    query: web::Query<SearchPlacesQuery>,
) -> Result<impl Responder, ApiError> {
    let text = query
        .query
        .as_deref()
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Query is required".to_string()))?;

    let body = places.text_search(text).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// GET /places/details?placeId=
pub async fn get_place_details(
    places: web::Data<GooglePlacesClient>,
    query: web::Query<PlaceDetailsQuery>,
) -> Result<impl Responder, ApiError> {
    let place_id = query
        .place_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("placeId is required".to_string()))?;

    let body = places.place_details(place_id).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// GET /places/images?photoReference=
/// Public: image tags cannot send an Authorization header.
pub async fn relay_place_image(
    places: web::Data<GooglePlacesClient>,
    query: web::Query<PlaceImageQuery>,
) -> Result<impl Responder, ApiError> {
    let reference = query
        .photo_reference
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("photoReference is required".to_string()))?;

    let (content_type, bytes) = places.fetch_photo(reference, query.maxwidth).await?;
    Ok(HttpResponse::Ok()
        .content_type(content_type.as_str())
        .body(bytes))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/places")
            .service(web::resource("/images").route(web::get().to(relay_place_image)))
            .service(
                web::resource("/details")
                    .wrap(RequireAuth)
                    .route(web::get().to(get_place_details)),
            )
            .service(
                web::resource("")
                    .wrap(RequireAuth)
                    .route(web::get().to(search_places)),
            ),
    );
}
