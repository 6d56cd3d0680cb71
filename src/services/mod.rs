// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod budget_service;
pub mod cache;
pub mod destination_service;
pub mod google_identity;
pub mod itinerary_service;
pub mod ownership;
pub mod places_client;
pub mod plan_generator;
pub mod trip_service;
pub mod user_service;

pub use budget_service::*;
pub use cache::*;
pub use destination_service::*;
pub use google_identity::*;
pub use itinerary_service::*;
pub use ownership::*;
pub use places_client::*;
pub use plan_generator::*;
pub use trip_service::*;
pub use user_service::*;
