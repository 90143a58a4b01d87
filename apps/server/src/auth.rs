//! JWT authentication module.
//!
//! Handles token generation and validation, and the extractors handlers use
//! to require a logged-in cashier or an administrator.
//!
//! ```text
//! POST /auth/login ──► JwtManager::generate_access_token ──► "eyJ..."
//!
//! GET /products
//!   Authorization: Bearer eyJ...
//!        │
//!        ▼
//!   CurrentCashier extractor ──► JwtManager::validate_access_token
//!        │                     ──► account still active? (role from db)
//!        │
//!        ▼
//!   handler(cashier: CurrentCashier, ...)
//! ```

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bingo_core::{Cashier, Role};

use crate::error::ApiError;
use crate::AppState;

const ACCESS_TOKEN: &str = "access";

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (cashier id)
    pub sub: String,

    /// Login name, for logs and the UI header
    pub username: String,

    /// What the holder may do
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,

    /// Token type
    pub token_type: String,
}

/// JWT token manager.
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: &str, access_lifetime_secs: i64) -> Self {
        JwtManager {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_lifetime_secs,
        }
    }

    pub fn access_lifetime_secs(&self) -> i64 {
        self.access_lifetime_secs
    }

    /// Generate an access token for a logged-in cashier.
    pub fn generate_access_token(&self, cashier: &Cashier) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_lifetime_secs);

        let claims = Claims {
            sub: cashier.id.to_string(),
            username: cashier.username.clone(),
            role: cashier.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: ACCESS_TOKEN.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        let token_data: TokenData<Claims> =
            decode(token, &self.decoding_key, &Validation::default()).map_err(|e| {
                tracing::debug!(error = %e, "Rejected token");
                ApiError::unauthorized("Invalid or expired session")
            })?;

        Ok(token_data.claims)
    }

    /// Validate that a token is an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, ApiError> {
        let claims = self.validate_token(token)?;

        if claims.token_type != ACCESS_TOKEN {
            return Err(ApiError::unauthorized("Expected access token"));
        }

        Ok(claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// =============================================================================
// Extractors
// =============================================================================

/// The cashier making the request, taken from a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentCashier {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl CurrentCashier {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl TryFrom<Claims> for CurrentCashier {
    type Error = ApiError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse()
            .map_err(|_| ApiError::unauthorized("Invalid or expired session"))?;

        Ok(CurrentCashier {
            id,
            username: claims.username,
            role: claims.role,
        })
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentCashier {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Login required"))?;

        let token = extract_bearer_token(header)
            .ok_or_else(|| ApiError::unauthorized("Login required"))?;

        let claims = state.jwt.validate_access_token(token)?;
        let session = CurrentCashier::try_from(claims)?;

        // Active flag and role are read from the account on every request,
        // so deactivating or demoting takes effect before the token expires.
        let cashier = state
            .db
            .cashiers()
            .get_by_id(session.id)
            .await?
            .filter(|cashier| cashier.active)
            .ok_or_else(|| {
                tracing::info!(cashier_id = session.id, "Token for inactive or missing account");
                ApiError::unauthorized("Session is no longer valid")
            })?;

        Ok(CurrentCashier {
            id: cashier.id,
            username: cashier.username,
            role: cashier.role,
        })
    }
}

/// A logged-in administrator. Rejects cashiers with 403.
#[derive(Debug, Clone)]
pub struct AdminCashier(pub CurrentCashier);

impl FromRequestParts<Arc<AppState>> for AdminCashier {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let cashier = CurrentCashier::from_request_parts(parts, state).await?;

        if !cashier.is_admin() {
            tracing::info!(cashier_id = cashier.id, "Admin route refused");
            return Err(ApiError::forbidden("Administrator access required"));
        }

        Ok(AdminCashier(cashier))
    }
}
