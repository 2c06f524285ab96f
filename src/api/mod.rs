//! API Layer
//!
//! HTTP endpoints for customer authentication and management.

pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use handlers::AppState;
pub use middleware::{auth_middleware, extract_auth_customer, AuthCustomer};
pub use routes::{create_minimal_routes, create_routes, RouterBuilder};
