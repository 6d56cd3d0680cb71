// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod ai;
pub mod budget_item;
pub mod destination;
pub mod itinerary;
pub mod trip;
pub mod user;

pub use ai::*;
pub use budget_item::*;
pub use destination::*;
pub use itinerary::*;
pub use trip::*;
pub use user::*;
