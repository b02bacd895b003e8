//! Caller authentication.
//!
//! Session JWTs are issued by the external auth service and signed with a
//! secret it shares with this server (HS256). The server only verifies them
//! and hands the resulting owner id to the profile store.

use axum::http::{header, HeaderMap};
use jsonwebtoken::DecodingKey;
use talant_shared::constants::AUTH_COOKIE;
use talant_shared::session::validate_caller;
use talant_shared::Caller;
use tracing::debug;

use crate::error::ApiError;

/// Verifies session JWTs signed by the auth service.
#[derive(Clone)]
pub struct SessionVerifier {
    /// `None` when no secret is configured: every token is refused.
    key: Option<DecodingKey>,
}

impl SessionVerifier {
    pub fn new(secret: &str) -> Self {
        let key = (!secret.is_empty()).then(|| DecodingKey::from_secret(secret.as_bytes()));
        Self { key }
    }

    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    /// Authenticate the request from its `auth_token` cookie, or from an
    /// `Authorization: Bearer` header when no cookie is present.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Caller, ApiError> {
        let token = session_token(headers)
            .ok_or_else(|| ApiError::Unauthorized("missing token".into()))?;

        let Some(key) = &self.key else {
            debug!("No JWT secret configured, rejecting session token");
            return Err(ApiError::Unauthorized("invalid token".into()));
        };

        validate_caller(&token, key).map_err(|e| {
            debug!(error = %e, "Rejected session token");
            ApiError::Unauthorized("invalid token".into())
        })
    }
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.trim().to_string());

    if from_cookie.is_some() {
        return from_cookie;
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
