/// Application name
pub const APP_NAME: &str = "Talant";

/// Default file name of the persisted profile document
pub const PROFILE_DOCUMENT: &str = "ankety.json";

/// Default attachment root
pub const UPLOAD_DIR: &str = "uploads";

/// Sub-directory of the attachment root holding profile photos.
/// Stored photo references are prefixed with it (`photos/<file>`).
pub const PHOTO_DIR: &str = "photos";

/// Served when a requested photo is missing from disk
pub const DEFAULT_AVATAR: &str = "default_avatar.png";

/// Maximum photo upload size in bytes (10 MiB)
pub const MAX_PHOTO_SIZE: usize = 10 * 1024 * 1024;

/// Declared content types accepted for photo uploads
pub const ALLOWED_PHOTO_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// Fallback content type for files with an unknown extension
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Cookie carrying the session token
pub const AUTH_COOKIE: &str = "auth_token";
