//! Authentication Middleware
//!
//! Bearer-token authentication for customer endpoints.

use crate::models::CustomerContext;
use crate::service::JwtService;
use crate::utils::error::AppError;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Extension type for storing the authenticated customer in request extensions
#[derive(Debug, Clone)]
pub struct AuthCustomer(pub CustomerContext);

/// Authentication middleware that validates access tokens
///
/// Requires `Authorization: Bearer <token>` where the token was signed with
/// the access secret for a customer. On success the customer context is
/// added to request extensions; anything else is a 401 "invalid token".
pub async fn auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&headers).ok_or_else(invalid_token)?;

    let context = jwt_service.verify_access_token(token).map_err(|e| {
        log::warn!("Access token rejected: {}", e);
        invalid_token()
    })?;

    request.extensions_mut().insert(AuthCustomer(context));

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn invalid_token() -> AppError {
    AppError::InvalidToken("invalid token".into())
}

/// Helper function to extract the authenticated customer from request extensions
pub fn extract_auth_customer(request: &Request) -> Result<&CustomerContext, AppError> {
    request
        .extensions()
        .get::<AuthCustomer>()
        .map(|auth| &auth.0)
        .ok_or_else(invalid_token)
}
