//! Request and Response Models
//!
//! Data structures for API request and response payloads with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::customer::Customer;
use crate::utils::validation::{email_validator, full_name_validator, phone_validator};

/// Default page size for customer listings
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Request payload for registering a new customer
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCustomerRequest {
    /// Customer's full name (1-100 characters)
    #[validate(custom(function = "full_name_validator"))]
    pub full_name: String,

    /// Phone number (must be unique)
    #[validate(custom(function = "phone_validator"))]
    pub phone: String,

    /// Email address (must be unique and valid format)
    #[validate(custom(function = "email_validator"))]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 6, max = 128, message = "Password must be between 6 and 128 characters"))]
    pub password: String,

    /// Optional delivery address
    #[serde(default)]
    pub address: Option<String>,
}

/// Request payload for customer login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "This field is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "This field is required"))]
    pub password: String,
}

/// Request payload for exchanging a refresh token
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token cannot be empty"))]
    pub refresh_token: String,
}

/// Request payload for changing a customer's password
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "This field is required"))]
    pub current_password: String,

    #[validate(length(min = 6, max = 128, message = "Password must be between 6 and 128 characters"))]
    pub new_password: String,

    pub confirm_password: String,
}

/// Request payload for updating a customer's profile
///
/// Email is immutable after registration.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[validate(custom(function = "full_name_validator"))]
    pub full_name: Option<String>,

    #[validate(custom(function = "phone_validator"))]
    pub phone: Option<String>,

    pub address: Option<String>,
}

/// Query string for paginated customer listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCustomersQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Response for a successful login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub customer: Customer,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Plain acknowledgement response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One page of results plus navigation metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };

        Self {
            items,
            total,
            page,
            limit,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// Response for health check
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::messages;

    fn valid_registration() -> RegisterCustomerRequest {
        RegisterCustomerRequest {
            full_name: "Pham Minh Chau".to_string(),
            phone: "111".to_string(),
            email: "a@x.com".to_string(),
            password: "Secret1".to_string(),
            address: None,
        }
    }

    #[test]
    fn test_registration_validation_accepts_minimal_customer() {
        assert!(valid_registration().validate().is_ok());
    }

    #[test]
    fn test_registration_validation_rejects_bad_fields() {
        let mut request = valid_registration();
        request.email = "not-an-email".to_string();
        request.password = "short".to_string();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("phone"));
    }

    #[test]
    fn test_registration_deserializes_camel_case() {
        let request: RegisterCustomerRequest = serde_json::from_value(serde_json::json!({
            "fullName": "Pham Minh Chau",
            "phone": "0901234567",
            "email": "chau@example.com",
            "password": "Secret1",
            "address": "1 Trang Tien"
        }))
        .unwrap();

        assert_eq!(request.full_name, "Pham Minh Chau");
        assert_eq!(request.address.as_deref(), Some("1 Trang Tien"));
    }

    #[test]
    fn test_update_request_validates_only_present_fields() {
        let request = UpdateCustomerRequest {
            address: Some("New address".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        let request = UpdateCustomerRequest {
            phone: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_password_length_message_matches_shared_constant() {
        let request = ChangePasswordRequest {
            current_password: "Secret1".into(),
            new_password: "abc".into(),
            confirm_password: "abc".into(),
        };
        let errors = request.validate().unwrap_err();
        let message = errors.field_errors()["new_password"][0]
            .message
            .as_ref()
            .unwrap()
            .to_string();

        assert_eq!(message, messages::PASSWORD_LENGTH);
    }

    #[test]
    fn test_pagination_metadata() {
        let page: PaginatedResponse<u8> = PaginatedResponse::new(vec![1, 2], 25, 2, 10);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next_page);
        assert!(page.has_prev_page);

        let page: PaginatedResponse<u8> = PaginatedResponse::new(vec![], 0, 1, 10);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next_page);
        assert!(!page.has_prev_page);
    }
}
