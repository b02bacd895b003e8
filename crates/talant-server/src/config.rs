//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use talant_shared::constants::{MAX_PHOTO_SIZE, PROFILE_DOCUMENT, UPLOAD_DIR};

/// Server configuration.
#[derive(Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Path of the JSON profile document.
    /// Env: `PROFILE_DOCUMENT`
    /// Default: `./ankety.json`
    pub profile_document: PathBuf,

    /// Attachment root; photos are kept in its `photos/` sub-directory.
    /// Env: `UPLOAD_DIR`
    /// Default: `./uploads`
    pub upload_dir: PathBuf,

    /// Maximum photo size in bytes.
    /// Env: `MAX_PHOTO_SIZE`
    /// Default: 10 MiB
    pub max_photo_size: usize,

    /// HS256 secret shared with the auth service that signs session JWTs.
    /// Env: `JWT_SECRET`
    /// Default: empty (every token is rejected).
    pub jwt_secret: String,

    /// Origin allowed to make credentialed cross-origin requests.
    /// Env: `CORS_ORIGIN`
    /// Default: none (any origin, without credentials).
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], 8080).into(),
            profile_document: PathBuf::from(PROFILE_DOCUMENT),
            upload_dir: PathBuf::from(UPLOAD_DIR),
            max_photo_size: MAX_PHOTO_SIZE,
            jwt_secret: String::new(),
            cors_origin: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = var("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Some(path) = var("PROFILE_DOCUMENT") {
            config.profile_document = PathBuf::from(path);
        }

        if let Some(path) = var("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(path);
        }

        if let Some(val) = var("MAX_PHOTO_SIZE") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.max_photo_size = n,
                _ => tracing::warn!(value = %val, "Invalid MAX_PHOTO_SIZE, using default"),
            }
        }

        if let Some(secret) = var("JWT_SECRET") {
            config.jwt_secret = secret;
        }

        if let Some(origin) = var("CORS_ORIGIN") {
            if !origin.is_empty() {
                config.cors_origin = Some(origin);
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

// Keeps the JWT secret out of logs.
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secret = if self.jwt_secret.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("ServerConfig")
            .field("http_addr", &self.http_addr)
            .field("profile_document", &self.profile_document)
            .field("upload_dir", &self.upload_dir)
            .field("max_photo_size", &self.max_photo_size)
            .field("jwt_secret", &secret)
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}
