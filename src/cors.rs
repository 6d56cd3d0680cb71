// src/cors.rs
// DOCUMENTATION: CORS policy
// PURPOSE: Allow the browser client's origin; auth travels in a bearer
// header, so no cookie or credential support is needed

use actix_cors::Cors;
use actix_web::http::header;

pub fn default(origin: &str) -> Cors {
    Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .allowed_origin(origin)
        .max_age(3600)
}
