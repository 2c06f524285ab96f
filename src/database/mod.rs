//! Database Module
//!
//! Connection management and the customer credential store implementations.

pub mod connection;
pub mod memory;
pub mod postgres;
pub mod store;

// Re-export commonly used types
pub use connection::{DatabaseConfig, DatabasePool, Pagination};
pub use memory::InMemoryCustomerStore;
pub use postgres::PgCustomerStore;
pub use store::{CustomerStore, StoreError, StoreResult, UniqueField};
