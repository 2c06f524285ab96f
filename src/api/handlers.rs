//! HTTP Request Handlers
//!
//! Axum handlers for processing HTTP requests and responses.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use super::middleware::AuthCustomer;
use crate::{
    models::{requests::*, AccessToken, Customer},
    service::{AuthService, CustomerService, JwtService},
    utils::error::AppResult,
    VERSION,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub customer_service: Arc<CustomerService>,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>, customer_service: Arc<CustomerService>) -> Self {
        Self {
            auth_service,
            customer_service,
        }
    }

    /// Token issuer used by the authentication middleware
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.auth_service.jwt_service()
    }
}

/// Register a new customer
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterCustomerRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let Json(request) = payload?;
    let customer = state.auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let response = state.auth_service.login(request).await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a new access token
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> AppResult<Json<AccessToken>> {
    let Json(request) = payload?;
    let token = state.auth_service.refresh_access_token(request).await?;
    Ok(Json(token))
}

/// Change a customer's password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(AuthCustomer(caller)): Extension<AuthCustomer>,
    customer_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(customer_id) = customer_id?;
    let Json(request) = payload?;

    log::debug!(
        "Customer {} requested password change for {}",
        caller.customer_id,
        customer_id
    );
    let response = state
        .auth_service
        .change_password(customer_id, request)
        .await?;
    Ok(Json(response))
}

/// List customers, newest first
pub async fn list_customers(
    State(state): State<AppState>,
    query: Result<Query<ListCustomersQuery>, QueryRejection>,
) -> AppResult<Json<PaginatedResponse<Customer>>> {
    let Query(query) = query?;
    let page = state.customer_service.list_customers(query).await?;
    Ok(Json(page))
}

/// Get customer by ID
pub async fn get_customer(
    State(state): State<AppState>,
    customer_id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<Customer>> {
    let Path(customer_id) = customer_id?;
    let customer = state.customer_service.get_customer(customer_id).await?;
    Ok(Json(customer))
}

/// Update customer profile
pub async fn update_customer(
    State(state): State<AppState>,
    customer_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> AppResult<Json<Customer>> {
    let Path(customer_id) = customer_id?;
    let Json(request) = payload?;
    let customer = state
        .customer_service
        .update_customer(customer_id, request)
        .await?;
    Ok(Json(customer))
}

/// Delete a customer
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(AuthCustomer(caller)): Extension<AuthCustomer>,
    customer_id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(customer_id) = customer_id?;

    log::info!(
        "Customer {} requested deletion of {}",
        caller.customer_id,
        customer_id
    );
    let response = state.customer_service.delete_customer(customer_id).await?;
    Ok(Json(response))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthCheckResponse>> {
    // Check store connectivity
    state.customer_service.health_check().await?;

    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: VERSION.to_string(),
    };

    Ok(Json(response))
}
