//! Security Utilities
//!
//! bcrypt password hashing and verification.

use bcrypt::{hash, verify, BcryptError};

/// Default bcrypt cost for password hashing
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Hash a password with custom bcrypt cost
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Verify a password against its hash
///
/// bcrypt re-derives the hash from the stored salt and compares in constant time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    verify(password, hash)
}

/// Errors from hashing work moved off the async runtime
#[derive(Debug, thiserror::Error)]
pub enum PasswordTaskError {
    #[error(transparent)]
    Bcrypt(#[from] BcryptError),

    #[error("password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Hash a password on the blocking thread pool
pub async fn hash_password_blocking(
    password: String,
    cost: u32,
) -> Result<String, PasswordTaskError> {
    let hashed =
        tokio::task::spawn_blocking(move || hash_password_with_cost(&password, cost)).await??;
    Ok(hashed)
}

/// Verify a password on the blocking thread pool
pub async fn verify_password_blocking(
    password: String,
    hash: String,
) -> Result<bool, PasswordTaskError> {
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;
    Ok(valid)
}
