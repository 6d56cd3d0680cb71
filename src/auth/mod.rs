// src/auth/mod.rs
// DOCUMENTATION: Authentication module organization
// PURPOSE: Re-export token and middleware components

pub mod middleware;
pub mod token;

pub use middleware::{AuthUser, RequireAuth};
