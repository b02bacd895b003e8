use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::types::OwnerId;

// Claims of the JWT issued by the auth service and kept in the `auth_token` cookie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    /// Expiry as a unix timestamp in seconds.
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(user_id: &str, username: &str, valid_for: Duration) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: username.to_string(),
            exp: (Utc::now() + valid_for).timestamp(),
        }
    }
}

/// An authenticated caller, as seen by the profile store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub owner_id: OwnerId,
    pub display_name: String,
}

/// HS256 key pair derived from the secret shared with the auth service.
#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Issue a token the way the auth service does.
pub fn create_session_token(
    claims: &SessionClaims,
    key: &EncodingKey,
) -> Result<String, SessionError> {
    encode(&Header::new(Algorithm::HS256), claims, key).map_err(|_| SessionError::Malformed)
}

/// Verify a session token and return the caller it identifies.
pub fn validate_caller(token: &str, key: &DecodingKey) -> Result<Caller, SessionError> {
    let claims = verify_session_token(token, key)?;
    Ok(Caller {
        owner_id: OwnerId(claims.user_id),
        display_name: claims.username,
    })
}

pub fn verify_session_token(token: &str, key: &DecodingKey) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<SessionClaims>(token.trim(), key, &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => SessionError::Expired,
            ErrorKind::InvalidSignature => SessionError::BadSignature,
            _ => SessionError::Malformed,
        }
    })?;

    if data.claims.user_id.is_empty() {
        return Err(SessionError::Malformed);
    }

    Ok(data.claims)
}
