//! Authentication Models
//!
//! Data structures for JWT issuance and verification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token class carried by every token issued to a customer
pub const CUSTOMER_TOKEN_CLASS: &str = "customer";

/// What a token says about its bearer, before timestamps are attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    /// Subject - customer ID
    pub subject: String,

    /// Principal type the token authenticates
    pub token_class: String,
}

impl TokenPayload {
    /// Payload for a customer principal
    pub fn customer(customer_id: Uuid) -> Self {
        Self {
            subject: customer_id.to_string(),
            token_class: CUSTOMER_TOKEN_CLASS.to_string(),
        }
    }
}

/// JWT claims structure shared by access and refresh tokens
///
/// Access and refresh tokens differ only in the secret that signs them and
/// their lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject - customer ID
    pub sub: String,

    /// Token class (always "customer" for customer tokens)
    #[serde(rename = "type")]
    pub token_class: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID - unique token identifier
    pub jti: String,
}

impl TokenClaims {
    /// Build claims for `payload`, valid for `expires_in` from `issued_at`
    pub fn new(payload: &TokenPayload, issued_at: DateTime<Utc>, expires_in: Duration) -> Self {
        Self {
            sub: payload.subject.clone(),
            token_class: payload.token_class.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + expires_in).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Freshly issued access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived access token for API authentication
    pub access_token: String,

    /// Long-lived refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}

/// A single access token and its lifetime in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Customer context extracted from a verified access token
#[derive(Debug, Clone)]
pub struct CustomerContext {
    /// Customer ID extracted from token subject
    pub customer_id: Uuid,

    /// Token ID for tracing
    pub token_id: String,

    /// Token expiration time
    pub expires_at: DateTime<Utc>,
}

impl CustomerContext {
    /// Create customer context from verified claims
    pub fn from_claims(claims: &TokenClaims) -> Result<Self, uuid::Error> {
        Ok(Self {
            customer_id: Uuid::parse_str(&claims.sub)?,
            token_id: claims.jti.clone(),
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let customer_id = Uuid::new_v4();
        let now = Utc::now();
        let claims = TokenClaims::new(&TokenPayload::customer(customer_id), now, Duration::hours(24));

        assert_eq!(claims.sub, customer_id.to_string());
        assert_eq!(claims.token_class, CUSTOMER_TOKEN_CLASS);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 86400);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_claims_serialize_token_class_as_type() {
        let claims = TokenClaims::new(
            &TokenPayload::customer(Uuid::new_v4()),
            Utc::now(),
            Duration::minutes(5),
        );
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["type"], "customer");
        assert!(json.get("token_class").is_none());
    }

    #[test]
    fn test_token_pair_serializes_camel_case() {
        let pair = TokenPair::new("access".into(), "refresh".into(), 86400);
        let json = serde_json::to_value(&pair).unwrap();

        assert_eq!(json["accessToken"], "access");
        assert_eq!(json["refreshToken"], "refresh");
        assert_eq!(json["expiresIn"], 86400);
    }

    #[test]
    fn test_customer_context_from_claims() {
        let customer_id = Uuid::new_v4();
        let claims = TokenClaims::new(
            &TokenPayload::customer(customer_id),
            Utc::now(),
            Duration::hours(1),
        );
        let context = CustomerContext::from_claims(&claims).unwrap();

        assert_eq!(context.customer_id, customer_id);
        assert_eq!(context.token_id, claims.jti);
        assert_eq!(context.expires_at.timestamp(), claims.exp);
    }

    #[test]
    fn test_customer_context_rejects_non_uuid_subject() {
        let claims = TokenClaims::new(
            &TokenPayload {
                subject: "not-a-uuid".into(),
                token_class: CUSTOMER_TOKEN_CLASS.into(),
            },
            Utc::now(),
            Duration::hours(1),
        );

        assert!(CustomerContext::from_claims(&claims).is_err());
    }
}
