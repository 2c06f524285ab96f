//! JWT Token Issuer
//!
//! Signs and verifies the HS256 tokens handed to customers. Access and refresh
//! tokens are signed with independent secrets, so neither can stand in for the
//! other.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::models::{
    AccessToken, CustomerContext, TokenClaims, TokenPair, TokenPayload, CUSTOMER_TOKEN_CLASS,
};

/// Why a token could not be issued or accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// `exp` is in the past
    #[error("token has expired")]
    Expired,

    /// Signature does not match the secret used for verification
    #[error("token signature is invalid")]
    InvalidSignature,

    /// Not a decodable JWT, or claims of the wrong shape
    #[error("token is malformed: {0}")]
    Malformed(String),

    /// Valid signature but issued for another principal type
    #[error("token class {0:?} is not accepted")]
    WrongClass(String),

    /// Encoding failed while issuing
    #[error("token could not be signed: {0}")]
    Signing(String),
}

/// Sign `payload` with `secret`, valid for `expires_in` from now
pub fn sign(payload: &TokenPayload, secret: &str, expires_in: Duration) -> Result<String, TokenError> {
    let claims = TokenClaims::new(payload, Utc::now(), expires_in);
    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, &claims, &encoding_key).map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify signature and expiry of `token` against `secret`
pub fn verify(token: &str, secret: &str) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.validate_aud = false;
    validation.leeway = 0;

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    decode::<TokenClaims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed(e.to_string()),
        })
}

/// Issues and verifies customer access/refresh tokens
#[derive(Clone)]
pub struct JwtService {
    /// JWT access token secret
    access_secret: String,
    /// JWT refresh token secret
    refresh_secret: String,
    /// Access token lifetime (default: 24 hours)
    access_token_expires_in: Duration,
    /// Refresh token lifetime (default: 7 days)
    refresh_token_expires_in: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expires_in", &self.access_token_expires_in)
            .field("refresh_token_expires_in", &self.refresh_token_expires_in)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Create a JWT service with default lifetimes
    pub fn new(access_secret: String, refresh_secret: String) -> Self {
        Self::with_expiration(
            access_secret,
            refresh_secret,
            Duration::hours(24),
            Duration::days(7),
        )
    }

    /// Create a JWT service with custom token lifetimes
    pub fn with_expiration(
        access_secret: String,
        refresh_secret: String,
        access_expires_in: Duration,
        refresh_expires_in: Duration,
    ) -> Self {
        Self {
            access_secret,
            refresh_secret,
            access_token_expires_in: access_expires_in,
            refresh_token_expires_in: refresh_expires_in,
        }
    }

    /// Create a JWT service from the injected auth configuration
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::with_expiration(
            config.access_secret.clone(),
            config.refresh_secret.clone(),
            config.access_expires_in,
            config.refresh_expires_in,
        )
    }

    /// Access token lifetime in seconds, as reported to clients
    pub fn access_expires_in_seconds(&self) -> i64 {
        self.access_token_expires_in.num_seconds()
    }

    /// Issue a fresh access and refresh token for a customer
    pub fn issue_token_pair(&self, customer_id: Uuid) -> Result<TokenPair, TokenError> {
        let payload = TokenPayload::customer(customer_id);
        let access_token = sign(&payload, &self.access_secret, self.access_token_expires_in)?;
        let refresh_token = sign(&payload, &self.refresh_secret, self.refresh_token_expires_in)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.access_expires_in_seconds(),
        ))
    }

    /// Issue a new access token only
    pub fn issue_access_token(&self, customer_id: Uuid) -> Result<AccessToken, TokenError> {
        let payload = TokenPayload::customer(customer_id);
        let access_token = sign(&payload, &self.access_secret, self.access_token_expires_in)?;

        Ok(AccessToken {
            access_token,
            expires_in: self.access_expires_in_seconds(),
        })
    }

    /// Verify an access token and extract the customer context
    pub fn verify_access_token(&self, token: &str) -> Result<CustomerContext, TokenError> {
        let claims = verify(token, &self.access_secret)?;
        Self::ensure_customer_class(&claims)?;

        CustomerContext::from_claims(&claims)
            .map_err(|_| TokenError::Malformed("subject is not a customer id".into()))
    }

    /// Verify a refresh token against the refresh secret
    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = verify(token, &self.refresh_secret)?;
        Self::ensure_customer_class(&claims)?;
        Ok(claims)
    }

    fn ensure_customer_class(claims: &TokenClaims) -> Result<(), TokenError> {
        if claims.token_class == CUSTOMER_TOKEN_CLASS {
            Ok(())
        } else {
            Err(TokenError::WrongClass(claims.token_class.clone()))
        }
    }
}
