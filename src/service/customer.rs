//! Customer Service Implementation
//!
//! Profile reads, updates, listing and deletion.

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::{CustomerStore, Pagination};
use crate::models::{
    Customer, CustomerPatch, ListCustomersQuery, MessageResponse, PaginatedResponse, SecretField,
    UpdateCustomerRequest, DEFAULT_PAGE_LIMIT,
};
use crate::service::error::{CustomerServiceError, CustomerServiceResult};
use crate::utils::validation::format_validation_errors;

/// Customer management over a credential store
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// Retrieves a customer by id
    pub async fn get_customer(&self, customer_id: Uuid) -> CustomerServiceResult<Customer> {
        self.store
            .find_by_id(customer_id, SecretField::Exclude)
            .await?
            .map(Customer::from)
            .ok_or(CustomerServiceError::CustomerNotFound)
    }

    /// Lists customers newest first
    pub async fn list_customers(
        &self,
        query: ListCustomersQuery,
    ) -> CustomerServiceResult<PaginatedResponse<Customer>> {
        let pagination = Pagination::new(
            query.page.unwrap_or(1),
            query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        );

        let (records, total) = self.store.list(pagination).await?;
        let items = records.into_iter().map(Customer::from).collect();

        Ok(PaginatedResponse::new(
            items,
            total,
            pagination.page,
            pagination.per_page,
        ))
    }

    /// Updates name, phone or address; email and password are not touched here
    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        request: UpdateCustomerRequest,
    ) -> CustomerServiceResult<Customer> {
        request
            .validate()
            .map_err(|e| CustomerServiceError::ValidationError(format_validation_errors(&e)))?;

        if self
            .store
            .find_by_id(customer_id, SecretField::Exclude)
            .await?
            .is_none()
        {
            return Err(CustomerServiceError::CustomerNotFound);
        }

        if let Some(phone) = &request.phone {
            if self
                .store
                .exists_with_phone_excluding(phone, customer_id)
                .await?
            {
                return Err(CustomerServiceError::PhoneInUse);
            }
        }

        let patch = CustomerPatch {
            full_name: request.full_name.map(|name| name.trim().to_string()),
            phone: request.phone,
            address: request.address,
            password_hash: None,
        };

        let record = self
            .store
            .update_by_id(customer_id, patch)
            .await?
            .ok_or(CustomerServiceError::CustomerNotFound)?;

        log::info!("Updated customer {}", customer_id);
        Ok(record.into())
    }

    /// Deletes a customer
    pub async fn delete_customer(&self, customer_id: Uuid) -> CustomerServiceResult<MessageResponse> {
        if !self.store.delete_by_id(customer_id).await? {
            return Err(CustomerServiceError::CustomerNotFound);
        }

        log::info!("Deleted customer {}", customer_id);
        Ok(MessageResponse::new("customer deleted successfully"))
    }

    /// Checks that the store is reachable
    pub async fn health_check(&self) -> CustomerServiceResult<()> {
        self.store.health_check().await?;
        Ok(())
    }
}
