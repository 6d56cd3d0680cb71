// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and compose the route table

use actix_web::web;

pub mod ai;
pub mod auth;
pub mod budget_items;
pub mod destinations;
pub mod health;
pub mod itineraries;
pub mod places;
pub mod public;
pub mod trips;

/// Full route table. The server is assembled from this one function so
/// tests can mount the exact same surface on a test app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::config(cfg);
    auth::config(cfg);
    public::config(cfg);
    trips::config(cfg);
    itineraries::config(cfg);
    budget_items::config(cfg);
    destinations::config(cfg);
    ai::config(cfg);
    places::config(cfg);
}
