//! Database Connection Management
//!
//! Utilities for managing PostgreSQL connections with SQLx.

use sqlx::PgPool;
use std::time::Duration;

/// Database connection pool type alias for convenience
pub type DatabasePool = PgPool;

/// Database configuration for connection setup
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/jewelry_shop".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(3600),
        }
    }
}

impl DatabaseConfig {
    /// Create a database connection pool from this configuration
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        sqlx::postgres::PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}

/// Page/limit pair translated into SQL limit and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Largest page size a caller may request
    pub const MAX_PER_PAGE: u32 = 100;

    pub fn new(page: u32, per_page: u32) -> Self {
        let per_page = per_page.clamp(1, Self::MAX_PER_PAGE);
        let page = page.max(1);
        let offset = (i64::from(page) - 1) * i64::from(per_page);

        Self {
            page,
            per_page,
            limit: i64::from(per_page),
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_creation() {
        let pagination = Pagination::new(1, 10);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 0);

        let pagination = Pagination::new(2, 20);
        assert_eq!(pagination.limit, 20);
        assert_eq!(pagination.offset, 20);
    }

    #[test]
    fn test_pagination_clamping() {
        let pagination = Pagination::new(1, 200);
        assert_eq!(pagination.limit, 100);
        assert_eq!(pagination.per_page, 100);

        let pagination = Pagination::new(0, 10);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.offset, 0);

        let pagination = Pagination::new(3, 0);
        assert_eq!(pagination.limit, 1);
        assert_eq!(pagination.offset, 2);
    }

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }
}
