//! Data Models Module
//!
//! Customer entities, token claims, and request/response types.

pub mod auth;
pub mod customer;
pub mod requests;

// Re-export commonly used types
pub use auth::*;
pub use customer::*;
pub use requests::*;
