//! Customer Model
//!
//! Core customer data structures and type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer representation for external API responses
///
/// This struct has no password field, so no response built from it can leak a
/// password hash. All datetime fields use UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier for the customer
    pub id: Uuid,

    /// Customer's full name
    pub full_name: String,

    /// Phone number (unique)
    pub phone: String,

    /// Email address (unique, stored exactly as registered)
    pub email: String,

    /// Optional delivery address
    pub address: Option<String>,

    /// Timestamp when the customer registered
    pub created_at: DateTime<Utc>,

    /// Timestamp when the customer record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Stored customer row as returned by the credential store
///
/// `password_hash` is only populated when the lookup asked for
/// [`SecretField::Include`]; ordinary reads leave it empty.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerRecord {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerRecord> for Customer {
    /// Strips the password hash from a stored record
    fn from(record: CustomerRecord) -> Self {
        Customer {
            id: record.id,
            full_name: record.full_name,
            phone: record.phone,
            email: record.email,
            address: record.address,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Whether a lookup should load the sensitive password hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretField {
    #[default]
    Exclude,
    Include,
}

/// Fields required to insert a new customer
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    pub address: Option<String>,
}

/// Partial update applied to a stored customer; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password_hash: Option<String>,
}

impl CustomerPatch {
    /// Patch that only replaces the password hash
    pub fn password(password_hash: String) -> Self {
        Self {
            password_hash: Some(password_hash),
            ..Self::default()
        }
    }
}
