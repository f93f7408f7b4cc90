//! Viewer capabilities from session tokens.
//!
//! Stat tables are public, so a request never fails authentication here.
//! The [`Viewer`] extractor looks for an `Authorization: Bearer <token>`
//! header and, when it carries a valid session JWT, reports the viewer as
//! logged in (and admin if the token says so). Anything else yields an
//! anonymous viewer.

use std::convert::Infallible;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mtgstats_grid::ViewerCapabilities;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Issuer stamped into and required from every session token.
pub const ISSUER: &str = "mtgstats";

/// Session lifetime in seconds.
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default)]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Invalid token issuer")]
    InvalidIssuer,
    #[error("Token validation failed: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Issues a session token for `username`.
///
/// This service only verifies tokens. They are minted by the site's login
/// flow, which shares `JWT_SECRET`, and by tests that need a logged-in
/// viewer.
pub fn generate_session_token(
    username: &str,
    is_admin: bool,
    jwt_secret: &str,
) -> Result<String, SessionTokenError> {
    let iat = now_secs();
    let claims = SessionClaims {
        sub: username.to_string(),
        is_admin,
        iat,
        exp: iat + SESSION_TTL_SECS,
        iss: ISSUER.to_string(),
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )?)
}

/// Validate a session JWT token and return the claims.
pub fn validate_session_token(
    token: &str,
    jwt_secret: &str,
) -> Result<SessionClaims, SessionTokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        use jsonwebtoken::errors::ErrorKind;

        if matches!(e.kind(), ErrorKind::ExpiredSignature) {
            SessionTokenError::Expired
        } else if matches!(e.kind(), ErrorKind::InvalidSignature) {
            SessionTokenError::InvalidSignature
        } else if matches!(e.kind(), ErrorKind::InvalidIssuer) {
            SessionTokenError::InvalidIssuer
        } else {
            SessionTokenError::Invalid(e)
        }
    })
}

/// Extract the Bearer token from the Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header_value = headers.get(AUTHORIZATION)?;
    let header_str = header_value.to_str().ok()?;

    let stripped = header_str.strip_prefix("Bearer ")?;
    if stripped.is_empty() {
        return None;
    }
    Some(stripped)
}

/// Who is looking at the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    username: Option<String>,
    capabilities: ViewerCapabilities,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self {
            username: None,
            capabilities: ViewerCapabilities::ANONYMOUS,
        }
    }

    pub fn from_claims(claims: SessionClaims) -> Self {
        Self {
            capabilities: ViewerCapabilities::new(true, claims.is_admin),
            username: Some(claims.sub),
        }
    }

    /// Resolves the viewer from request headers, failing closed.
    pub fn from_headers(headers: &HeaderMap, jwt_secret: &str) -> Self {
        let Some(token) = extract_bearer_token(headers) else {
            return Self::anonymous();
        };

        match validate_session_token(token, jwt_secret) {
            Ok(claims) => Self::from_claims(claims),
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring invalid session token");
                Self::anonymous()
            }
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn capabilities(&self) -> ViewerCapabilities {
        self.capabilities
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Without config there is no secret to verify against
        let Some(config) = parts.extensions.get::<Config>() else {
            tracing::warn!("Config extension missing, treating viewer as anonymous");
            return Ok(Self::anonymous());
        };

        Ok(Self::from_headers(&parts.headers, config.jwt_secret()))
    }
}
