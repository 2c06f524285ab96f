//! Customer Authentication Service
//!
//! Registration, login, password change and access-token refresh for shop
//! customers.

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::config::AuthConfig;
use crate::database::CustomerStore;
use crate::models::{
    AccessToken, ChangePasswordRequest, Customer, CustomerPatch, LoginRequest, LoginResponse,
    MessageResponse, NewCustomer, RefreshTokenRequest, RegisterCustomerRequest, SecretField,
};
use crate::service::error::{CustomerServiceError, CustomerServiceResult};
use crate::service::jwt::JwtService;
use crate::utils::{
    security::{hash_password_blocking, verify_password_blocking},
    validation::format_validation_errors,
};

/// Authentication workflows over a credential store
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CustomerStore>,

    /// Token issuer shared with the request authentication middleware
    jwt_service: Arc<JwtService>,

    /// bcrypt cost factor for new password hashes
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(store: Arc<dyn CustomerStore>, config: &AuthConfig) -> Self {
        Self::with_jwt_service(
            store,
            Arc::new(JwtService::from_config(config)),
            config.bcrypt_cost,
        )
    }

    /// Creates the service around an existing token issuer
    pub fn with_jwt_service(
        store: Arc<dyn CustomerStore>,
        jwt_service: Arc<JwtService>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            store,
            jwt_service,
            bcrypt_cost,
        }
    }

    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Creates a customer account
    ///
    /// Email is checked before phone, so a request colliding on both reports
    /// the email. A concurrent registration that slips past the pre-checks is
    /// caught by the store's unique constraints and reported the same way.
    pub async fn register(&self, request: RegisterCustomerRequest) -> CustomerServiceResult<Customer> {
        request
            .validate()
            .map_err(|e| CustomerServiceError::ValidationError(format_validation_errors(&e)))?;

        if self
            .store
            .find_by_email(&request.email, SecretField::Exclude)
            .await?
            .is_some()
        {
            return Err(CustomerServiceError::EmailInUse);
        }

        if self.store.find_by_phone(&request.phone).await?.is_some() {
            return Err(CustomerServiceError::PhoneInUse);
        }

        let password_hash = hash_password_blocking(request.password, self.bcrypt_cost).await?;

        let record = self
            .store
            .insert(NewCustomer {
                full_name: request.full_name.trim().to_string(),
                phone: request.phone,
                email: request.email,
                password_hash,
                address: request.address,
            })
            .await?;

        log::info!("Registered customer {}", record.id);
        Ok(record.into())
    }

    /// Authenticates by email and password and issues a token pair
    pub async fn login(&self, request: LoginRequest) -> CustomerServiceResult<LoginResponse> {
        request
            .validate()
            .map_err(|e| CustomerServiceError::ValidationError(format_validation_errors(&e)))?;

        let Some(record) = self
            .store
            .find_by_email(&request.email, SecretField::Include)
            .await?
        else {
            log::warn!("Login rejected: unknown email");
            return Err(CustomerServiceError::InvalidCredentials);
        };

        let Some(password_hash) = record.password_hash.clone() else {
            log::error!("Customer {} has no stored password hash", record.id);
            return Err(CustomerServiceError::InvalidCredentials);
        };

        if !verify_password_blocking(request.password, password_hash).await? {
            log::warn!("Login rejected: wrong password for customer {}", record.id);
            return Err(CustomerServiceError::InvalidCredentials);
        }

        let tokens = self
            .jwt_service
            .issue_token_pair(record.id)
            .map_err(CustomerServiceError::TokenIssue)?;

        Ok(LoginResponse {
            customer: record.into(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
        })
    }

    /// Replaces a customer's password after checking the current one
    ///
    /// Tokens issued before the change stay valid until they expire.
    pub async fn change_password(
        &self,
        customer_id: Uuid,
        request: ChangePasswordRequest,
    ) -> CustomerServiceResult<MessageResponse> {
        if request.new_password != request.confirm_password {
            return Err(CustomerServiceError::PasswordConfirmationMismatch);
        }

        request
            .validate()
            .map_err(|e| CustomerServiceError::ValidationError(format_validation_errors(&e)))?;

        let record = self
            .store
            .find_by_id(customer_id, SecretField::Include)
            .await?
            .ok_or(CustomerServiceError::CustomerNotFound)?;

        let current_hash = record
            .password_hash
            .ok_or(CustomerServiceError::IncorrectCurrentPassword)?;

        if !verify_password_blocking(request.current_password, current_hash).await? {
            return Err(CustomerServiceError::IncorrectCurrentPassword);
        }

        let new_hash = hash_password_blocking(request.new_password, self.bcrypt_cost).await?;

        self.store
            .update_by_id(customer_id, CustomerPatch::password(new_hash))
            .await?
            .ok_or(CustomerServiceError::CustomerNotFound)?;

        log::info!("Password changed for customer {}", customer_id);
        Ok(MessageResponse::new("password changed successfully"))
    }

    /// Exchanges a refresh token for a new access token
    ///
    /// Every failure, including a customer deleted since the token was issued,
    /// surfaces as the same invalid-token error.
    pub async fn refresh_access_token(
        &self,
        request: RefreshTokenRequest,
    ) -> CustomerServiceResult<AccessToken> {
        let claims = self
            .jwt_service
            .verify_refresh_token(&request.refresh_token)
            .map_err(|e| {
                log::warn!("Refresh token rejected: {}", e);
                CustomerServiceError::InvalidToken
            })?;

        let customer_id =
            Uuid::parse_str(&claims.sub).map_err(|_| CustomerServiceError::InvalidToken)?;

        if self
            .store
            .find_by_id(customer_id, SecretField::Exclude)
            .await?
            .is_none()
        {
            log::warn!("Refresh token rejected: customer {} no longer exists", customer_id);
            return Err(CustomerServiceError::InvalidToken);
        }

        self.jwt_service
            .issue_access_token(customer_id)
            .map_err(CustomerServiceError::TokenIssue)
    }
}
