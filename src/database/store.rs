//! Credential Store
//!
//! Persistence abstraction for customer identity records. Implementations must
//! enforce email and phone uniqueness atomically on insert and update.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::connection::Pagination;
use crate::models::{CustomerPatch, CustomerRecord, NewCustomer, SecretField};

/// Column protected by a unique constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Phone,
}

/// Errors reported by a credential store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Insert or update would break a unique constraint
    #[error("duplicate value for unique field {0:?}")]
    Duplicate(UniqueField),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations the customer services rely on
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Look up a customer by exact email
    async fn find_by_email(
        &self,
        email: &str,
        secret: SecretField,
    ) -> StoreResult<Option<CustomerRecord>>;

    /// Look up a customer by exact phone number (hash never loaded)
    async fn find_by_phone(&self, phone: &str) -> StoreResult<Option<CustomerRecord>>;

    /// Look up a customer by id
    async fn find_by_id(&self, id: Uuid, secret: SecretField)
        -> StoreResult<Option<CustomerRecord>>;

    /// Insert a new customer, assigning id and timestamps
    async fn insert(&self, customer: NewCustomer) -> StoreResult<CustomerRecord>;

    /// Apply a partial update; `None` when the id is unknown
    async fn update_by_id(
        &self,
        id: Uuid,
        patch: CustomerPatch,
    ) -> StoreResult<Option<CustomerRecord>>;

    /// Whether any customer other than `exclude_id` uses `phone`
    async fn exists_with_phone_excluding(&self, phone: &str, exclude_id: Uuid)
        -> StoreResult<bool>;

    /// Delete a customer; `false` when the id is unknown
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool>;

    /// One page of customers, newest first, plus the total count
    async fn list(&self, pagination: Pagination) -> StoreResult<(Vec<CustomerRecord>, u64)>;

    /// Check store connectivity
    async fn health_check(&self) -> StoreResult<()>;
}
