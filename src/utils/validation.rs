//! Validation Utilities
//!
//! Input validation functions for customer data and API requests.

use regex::Regex;
use std::sync::OnceLock;
use validator::{ValidationError, ValidationErrors};

/// Maximum stored length of an email address
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Maximum length of a customer's full name
pub const MAX_FULL_NAME_LENGTH: usize = 100;

/// Validates email address format
pub fn validate_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    email.len() <= MAX_EMAIL_LENGTH && regex.is_match(email)
}

/// Validates a full name: non-blank and at most 100 characters
pub fn validate_full_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_FULL_NAME_LENGTH
}

/// Validates a phone number: optional leading `+`, then 3-20 digits
pub fn validate_phone(phone: &str) -> bool {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX
        .get_or_init(|| Regex::new(r"^\+?[0-9]{3,20}$").expect("Failed to compile phone regex"));

    regex.is_match(phone)
}

/// Custom validator for email fields using the validator crate
pub fn email_validator(email: &str) -> Result<(), ValidationError> {
    if validate_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_email").with_message(messages::INVALID_EMAIL.into()))
    }
}

/// Custom validator for full name fields using the validator crate
pub fn full_name_validator(name: &str) -> Result<(), ValidationError> {
    if validate_full_name(name) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_full_name")
            .with_message(messages::INVALID_FULL_NAME.into()))
    }
}

/// Custom validator for phone fields using the validator crate
pub fn phone_validator(phone: &str) -> Result<(), ValidationError> {
    if validate_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone").with_message(messages::INVALID_PHONE.into()))
    }
}

/// Flattens validator output into a single `field: message` list
///
/// Field names are reported in camelCase, as they appear in request bodies.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            let field = camel_case(field);
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for field '{}'", field));
                format!("{}: {}", field, message)
            })
        })
        .collect();

    messages.sort();
    messages.join(", ")
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Validation error messages for user-friendly responses
pub mod messages {
    pub const INVALID_EMAIL: &str = "Please enter a valid email address";
    pub const INVALID_FULL_NAME: &str = "Full name must be between 1 and 100 characters";
    pub const INVALID_PHONE: &str = "Phone must contain 3 to 20 digits, optionally prefixed by +";
    pub const PASSWORD_LENGTH: &str = "Password must be between 6 and 128 characters";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com"));
        assert!(validate_email("test.user+tag@domain.co.uk"));
        assert!(!validate_email("invalid.email"));
        assert!(!validate_email("@domain.com"));
        assert!(!validate_email("user@"));
        assert!(!validate_email(""));
        assert!(!validate_email(&format!("{}@example.com", "a".repeat(250))));
    }

    #[test]
    fn test_email_case_is_not_rewritten() {
        assert!(validate_email("Mixed.Case@Example.COM"));
    }

    #[test]
    fn test_validate_full_name() {
        assert!(validate_full_name("Nguyen Van A"));
        assert!(validate_full_name("Trần Thị Bích"));
        assert!(!validate_full_name(""));
        assert!(!validate_full_name("   "));
        assert!(!validate_full_name(&"a".repeat(101)));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("111"));
        assert!(validate_phone("0901234567"));
        assert!(validate_phone("+84901234567"));
        assert!(!validate_phone("12"));
        assert!(!validate_phone("090-123-4567"));
        assert!(!validate_phone("++84901234567"));
        assert!(!validate_phone(""));
    }

    #[test]
    fn test_custom_validators_carry_messages() {
        let err = phone_validator("abc").unwrap_err();
        assert_eq!(err.code, "invalid_phone");
        assert_eq!(err.message.unwrap(), messages::INVALID_PHONE);
    }

    #[test]
    fn test_format_validation_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("phone", phone_validator("x").unwrap_err());
        errors.add("email", email_validator("y").unwrap_err());

        let formatted = format_validation_errors(&errors);
        assert_eq!(
            formatted,
            format!(
                "email: {}, phone: {}",
                messages::INVALID_EMAIL,
                messages::INVALID_PHONE
            )
        );
    }

    #[test]
    fn test_format_validation_errors_uses_request_field_names() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "new_password",
            ValidationError::new("length").with_message(messages::PASSWORD_LENGTH.into()),
        );
        errors.add("full_name", full_name_validator("").unwrap_err());

        let formatted = format_validation_errors(&errors);
        assert_eq!(
            formatted,
            format!(
                "fullName: {}, newPassword: {}",
                messages::INVALID_FULL_NAME,
                messages::PASSWORD_LENGTH
            )
        );
    }
}
