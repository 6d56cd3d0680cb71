// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export repository components

pub mod budget_item_repository;
pub mod destination_repository;
pub mod itinerary_repository;
pub mod trip_repository;
pub mod user_repository;

pub use budget_item_repository::*;
pub use destination_repository::*;
pub use itinerary_repository::*;
pub use trip_repository::*;
pub use user_repository::*;
