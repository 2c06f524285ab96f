//! PostgreSQL Credential Store
//!
//! `CustomerStore` backed by the `customers` table. Email and phone uniqueness
//! come from the `customers_email_key` and `customers_phone_key` constraints.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::connection::Pagination;
use super::store::{CustomerStore, StoreError, StoreResult, UniqueField};
use crate::models::{CustomerPatch, CustomerRecord, NewCustomer, SecretField};

const COLUMNS_WITH_SECRET: &str =
    "id, full_name, phone, email, password_hash, address, created_at, updated_at";

const COLUMNS_PUBLIC: &str =
    "id, full_name, phone, email, NULL::VARCHAR AS password_hash, address, created_at, updated_at";

fn columns(secret: SecretField) -> &'static str {
    match secret {
        SecretField::Include => COLUMNS_WITH_SECRET,
        SecretField::Exclude => COLUMNS_PUBLIC,
    }
}

/// Translate unique-constraint violations into `StoreError::Duplicate`
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.constraint() {
            Some("customers_email_key") => return StoreError::Duplicate(UniqueField::Email),
            Some("customers_phone_key") => return StoreError::Duplicate(UniqueField::Phone),
            _ => {}
        }
    }
    StoreError::Database(err)
}

/// Credential store backed by PostgreSQL
#[derive(Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn find_by_email(
        &self,
        email: &str,
        secret: SecretField,
    ) -> StoreResult<Option<CustomerRecord>> {
        let sql = format!("SELECT {} FROM customers WHERE email = $1", columns(secret));
        let record = sqlx::query_as::<_, CustomerRecord>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn find_by_phone(&self, phone: &str) -> StoreResult<Option<CustomerRecord>> {
        let sql = format!("SELECT {} FROM customers WHERE phone = $1", COLUMNS_PUBLIC);
        let record = sqlx::query_as::<_, CustomerRecord>(&sql)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        secret: SecretField,
    ) -> StoreResult<Option<CustomerRecord>> {
        let sql = format!("SELECT {} FROM customers WHERE id = $1", columns(secret));
        let record = sqlx::query_as::<_, CustomerRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn insert(&self, customer: NewCustomer) -> StoreResult<CustomerRecord> {
        let sql = format!(
            r#"
            INSERT INTO customers (id, full_name, phone, email, password_hash, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS_PUBLIC
        );

        sqlx::query_as::<_, CustomerRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(customer.full_name)
            .bind(customer.phone)
            .bind(customer.email)
            .bind(customer.password_hash)
            .bind(customer.address)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: CustomerPatch,
    ) -> StoreResult<Option<CustomerRecord>> {
        let sql = format!(
            r#"
            UPDATE customers
            SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address),
                password_hash = COALESCE($5, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS_PUBLIC
        );

        sqlx::query_as::<_, CustomerRecord>(&sql)
            .bind(id)
            .bind(patch.full_name)
            .bind(patch.phone)
            .bind(patch.address)
            .bind(patch.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn exists_with_phone_excluding(
        &self,
        phone: &str,
        exclude_id: Uuid,
    ) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE phone = $1 AND id <> $2)",
        )
        .bind(phone)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, pagination: Pagination) -> StoreResult<(Vec<CustomerRecord>, u64)> {
        let sql = format!(
            "SELECT {} FROM customers ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            COLUMNS_PUBLIC
        );

        let page_query = sqlx::query_as::<_, CustomerRecord>(&sql)
            .bind(pagination.limit)
            .bind(pagination.offset)
            .fetch_all(&self.pool);
        let count_query =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers").fetch_one(&self.pool);

        let (records, total) = tokio::try_join!(page_query, count_query)?;

        Ok((records, total.max(0) as u64))
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_customer(email: &str, phone: &str) -> NewCustomer {
        NewCustomer {
            full_name: "Vo Thanh Tam".to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
            address: Some("5 Le Loi".to_string()),
        }
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_insert_hides_hash_until_requested(pool: PgPool) {
        let store = PgCustomerStore::new(pool);
        let inserted = store
            .insert(new_customer("tam@example.com", "0901000001"))
            .await
            .unwrap();
        assert!(inserted.password_hash.is_none());

        let public = store
            .find_by_email("tam@example.com", SecretField::Exclude)
            .await
            .unwrap()
            .unwrap();
        assert!(public.password_hash.is_none());

        let with_secret = store
            .find_by_id(inserted.id, SecretField::Include)
            .await
            .unwrap()
            .unwrap();
        assert!(with_secret.password_hash.is_some());
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_unique_constraints_map_to_duplicate(pool: PgPool) {
        let store = PgCustomerStore::new(pool);
        store
            .insert(new_customer("tam@example.com", "0901000001"))
            .await
            .unwrap();

        let email_clash = store
            .insert(new_customer("tam@example.com", "0901000002"))
            .await;
        assert!(matches!(
            email_clash,
            Err(StoreError::Duplicate(UniqueField::Email))
        ));

        let phone_clash = store
            .insert(new_customer("other@example.com", "0901000001"))
            .await;
        assert!(matches!(
            phone_clash,
            Err(StoreError::Duplicate(UniqueField::Phone))
        ));
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_and_phone_exclusion(pool: PgPool) {
        let store = PgCustomerStore::new(pool);
        let first = store
            .insert(new_customer("first@example.com", "0901000001"))
            .await
            .unwrap();
        let second = store
            .insert(new_customer("second@example.com", "0901000002"))
            .await
            .unwrap();

        assert!(!store
            .exists_with_phone_excluding("0901000001", first.id)
            .await
            .unwrap());
        assert!(store
            .exists_with_phone_excluding("0901000001", second.id)
            .await
            .unwrap());

        let patch = CustomerPatch {
            address: Some("9 Dong Khoi".to_string()),
            ..Default::default()
        };
        let updated = store.update_by_id(first.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.address.as_deref(), Some("9 Dong Khoi"));
        assert_eq!(updated.phone, "0901000001");

        assert!(store
            .update_by_id(Uuid::new_v4(), CustomerPatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_list_and_delete(pool: PgPool) {
        let store = PgCustomerStore::new(pool);
        for i in 0..3 {
            store
                .insert(new_customer(
                    &format!("c{}@example.com", i),
                    &format!("090100000{}", i),
                ))
                .await
                .unwrap();
        }

        let (page, total) = store.list(Pagination::new(1, 2)).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 2);

        let victim = page[0].id;
        assert!(store.delete_by_id(victim).await.unwrap());
        assert!(!store.delete_by_id(victim).await.unwrap());
        assert!(store.health_check().await.is_ok());
    }
}
