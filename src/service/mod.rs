//! Service Layer
//!
//! Business logic for customer authentication and management.

pub mod auth;
pub mod customer;
pub mod error;
pub mod jwt;

// Re-export services
pub use auth::AuthService;
pub use customer::CustomerService;
pub use error::{CustomerServiceError, CustomerServiceResult, ErrorKind};
pub use jwt::{JwtService, TokenError};
