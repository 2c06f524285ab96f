//! Customer Service Library
//!
//! Customer accounts and authentication for the jewelry shop: registration,
//! email/password login, password change, access-token refresh, and profile
//! management.
//!
//! # Features
//!
//! - **Credential storage**: bcrypt password hashes, never returned to callers
//! - **Token issuing**: HS256 access and refresh tokens with independent secrets
//! - **Pluggable store**: PostgreSQL in production, in-memory for tests
//! - **Flexible Router**: Configurable endpoints via the `RouterBuilder` pattern
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use customer_service::{
//!     api::{AppState, RouterBuilder},
//!     config::AuthConfig,
//!     database::InMemoryCustomerStore,
//!     service::{AuthService, CustomerService},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryCustomerStore::new());
//!     let auth_config = AuthConfig::new("access_secret", "refresh_secret");
//!
//!     let auth_service = Arc::new(AuthService::new(store.clone(), &auth_config));
//!     let state = AppState::new(auth_service, Arc::new(CustomerService::new(store)));
//!
//!     let app = RouterBuilder::with_all_routes()
//!         .with_auth(state.jwt_service())
//!         .build()
//!         .with_state(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **API Layer**: HTTP handlers, bearer-token middleware and route builder
//! - **Service Layer**: Authentication workflows, customer management, token issuing
//! - **Models**: Customer records, token claims and request/response payloads
//! - **Database**: `CustomerStore` trait with PostgreSQL and in-memory implementations
//! - **Utils**: Password hashing, validation and HTTP error mapping

/// HTTP API layer with handlers and configurable routing
pub mod api;

/// Configuration management for all service settings
pub mod config;

/// Credential store trait, implementations and connection management
pub mod database;

/// Data models and request/response structures
pub mod models;

/// Authentication and customer management services
pub mod service;

/// Shared utilities for security, validation, and error handling
pub mod utils;

// Re-export commonly used types for convenient access
pub use api::{create_routes, AppState, RouterBuilder};
pub use models::{
    auth::{AccessToken, CustomerContext, TokenPair},
    customer::Customer,
    requests::{
        ChangePasswordRequest, LoginRequest, LoginResponse, RefreshTokenRequest,
        RegisterCustomerRequest, UpdateCustomerRequest,
    },
};
pub use service::{AuthService, CustomerService, CustomerServiceError, JwtService};
pub use utils::error::{AppError, AppResult, ErrorResponse};

// Re-export database utilities for configuration
pub use database::{CustomerStore, DatabaseConfig, DatabasePool};

// Re-export configuration system
pub use config::{env, AppConfig, AuthConfig, JwtConfig, PasswordConfig, ServerConfig};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
