//! In-Memory Credential Store
//!
//! `CustomerStore` kept in process memory. Uniqueness checks and writes happen
//! under one write lock, so concurrent registrations with the same email or
//! phone see exactly one winner.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::connection::Pagination;
use super::store::{CustomerStore, StoreResult, StoreError, UniqueField};
use crate::models::{CustomerPatch, CustomerRecord, NewCustomer, SecretField};

/// Credential store holding records in insertion order
#[derive(Default)]
pub struct InMemoryCustomerStore {
    records: RwLock<Vec<CustomerRecord>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn project(record: &CustomerRecord, secret: SecretField) -> CustomerRecord {
    let mut projected = record.clone();
    if secret == SecretField::Exclude {
        projected.password_hash = None;
    }
    projected
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_by_email(
        &self,
        email: &str,
        secret: SecretField,
    ) -> StoreResult<Option<CustomerRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.email == email)
            .map(|r| project(r, secret)))
    }

    async fn find_by_phone(&self, phone: &str) -> StoreResult<Option<CustomerRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.phone == phone)
            .map(|r| project(r, SecretField::Exclude)))
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        secret: SecretField,
    ) -> StoreResult<Option<CustomerRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.id == id)
            .map(|r| project(r, secret)))
    }

    async fn insert(&self, customer: NewCustomer) -> StoreResult<CustomerRecord> {
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.email == customer.email) {
            return Err(StoreError::Duplicate(UniqueField::Email));
        }
        if records.iter().any(|r| r.phone == customer.phone) {
            return Err(StoreError::Duplicate(UniqueField::Phone));
        }

        let now = Utc::now();
        let record = CustomerRecord {
            id: Uuid::new_v4(),
            full_name: customer.full_name,
            phone: customer.phone,
            email: customer.email,
            password_hash: Some(customer.password_hash),
            address: customer.address,
            created_at: now,
            updated_at: now,
        };
        records.push(record.clone());

        Ok(project(&record, SecretField::Exclude))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: CustomerPatch,
    ) -> StoreResult<Option<CustomerRecord>> {
        let mut records = self.records.write().await;

        if let Some(phone) = &patch.phone {
            if records.iter().any(|r| r.id != id && &r.phone == phone) {
                return Err(StoreError::Duplicate(UniqueField::Phone));
            }
        }

        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if let Some(full_name) = patch.full_name {
            record.full_name = full_name;
        }
        if let Some(phone) = patch.phone {
            record.phone = phone;
        }
        if let Some(address) = patch.address {
            record.address = Some(address);
        }
        if let Some(password_hash) = patch.password_hash {
            record.password_hash = Some(password_hash);
        }
        record.updated_at = Utc::now();

        Ok(Some(project(record, SecretField::Exclude)))
    }

    async fn exists_with_phone_excluding(
        &self,
        phone: &str,
        exclude_id: Uuid,
    ) -> StoreResult<bool> {
        let records = self.records.read().await;
        Ok(records.iter().any(|r| r.id != exclude_id && r.phone == phone))
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn list(&self, pagination: Pagination) -> StoreResult<(Vec<CustomerRecord>, u64)> {
        let records = self.records.read().await;
        let page = records
            .iter()
            .rev()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .map(|r| project(r, SecretField::Exclude))
            .collect();

        Ok((page, records.len() as u64))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_customer(email: &str, phone: &str) -> NewCustomer {
        NewCustomer {
            full_name: "Dang Quoc Bao".to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            password_hash: "stored-hash".to_string(),
            address: None,
        }
    }

    #[tokio::test]
    async fn test_lookups_respect_secret_field() {
        let store = InMemoryCustomerStore::new();
        let inserted = store
            .insert(new_customer("bao@example.com", "0902000001"))
            .await
            .unwrap();
        assert!(inserted.password_hash.is_none());

        let public = store
            .find_by_email("bao@example.com", SecretField::Exclude)
            .await
            .unwrap()
            .unwrap();
        assert!(public.password_hash.is_none());

        let with_secret = store
            .find_by_id(inserted.id, SecretField::Include)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(with_secret.password_hash.as_deref(), Some("stored-hash"));

        let by_phone = store.find_by_phone("0902000001").await.unwrap().unwrap();
        assert!(by_phone.password_hash.is_none());
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let store = InMemoryCustomerStore::new();
        store
            .insert(new_customer("Bao@Example.com", "0902000001"))
            .await
            .unwrap();

        assert!(store
            .find_by_email("bao@example.com", SecretField::Exclude)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_inserts_are_rejected() {
        let store = InMemoryCustomerStore::new();
        store
            .insert(new_customer("bao@example.com", "0902000001"))
            .await
            .unwrap();

        assert!(matches!(
            store.insert(new_customer("bao@example.com", "0902000002")).await,
            Err(StoreError::Duplicate(UniqueField::Email))
        ));
        assert!(matches!(
            store.insert(new_customer("other@example.com", "0902000001")).await,
            Err(StoreError::Duplicate(UniqueField::Phone))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_have_single_winner() {
        let store = Arc::new(InMemoryCustomerStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(new_customer("race@example.com", &format!("09030000{:02}", i)))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(StoreError::Duplicate(UniqueField::Email)) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(successes, 1);
    }

    #[tokio::test]
    async fn test_update_patch_and_phone_conflict() {
        let store = InMemoryCustomerStore::new();
        let first = store
            .insert(new_customer("first@example.com", "0902000001"))
            .await
            .unwrap();
        store
            .insert(new_customer("second@example.com", "0902000002"))
            .await
            .unwrap();

        let conflict = store
            .update_by_id(
                first.id,
                CustomerPatch {
                    phone: Some("0902000002".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(
            conflict,
            Err(StoreError::Duplicate(UniqueField::Phone))
        ));

        let updated = store
            .update_by_id(
                first.id,
                CustomerPatch {
                    full_name: Some("Dang Bao".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.full_name, "Dang Bao");
        assert_eq!(updated.phone, "0902000001");
        assert!(updated.updated_at >= first.updated_at);

        assert!(store
            .update_by_id(Uuid::new_v4(), CustomerPatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_paginated() {
        let store = InMemoryCustomerStore::new();
        for i in 0..5 {
            store
                .insert(new_customer(
                    &format!("c{}@example.com", i),
                    &format!("090200000{}", i),
                ))
                .await
                .unwrap();
        }

        let (first_page, total) = store.list(Pagination::new(1, 2)).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(first_page.len(), 2);
        assert_eq!(first_page[0].email, "c4@example.com");
        assert!(first_page.iter().all(|r| r.password_hash.is_none()));

        let (last_page, _) = store.list(Pagination::new(3, 2)).await.unwrap();
        assert_eq!(last_page.len(), 1);
        assert_eq!(last_page[0].email, "c0@example.com");
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let store = InMemoryCustomerStore::new();
        let record = store
            .insert(new_customer("bao@example.com", "0902000001"))
            .await
            .unwrap();

        assert!(store.delete_by_id(record.id).await.unwrap());
        assert!(!store.delete_by_id(record.id).await.unwrap());
        assert!(store
            .find_by_id(record.id, SecretField::Exclude)
            .await
            .unwrap()
            .is_none());
    }
}
