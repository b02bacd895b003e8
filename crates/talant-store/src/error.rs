use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required field is missing or blank.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The owner already has a profile.
    #[error("Profile already exists for this user")]
    DuplicateOwner,

    /// Lookup or delete target does not exist.
    #[error("Record not found")]
    NotFound,

    /// No record matches both the id and the owner. Wrong id and wrong
    /// owner are reported identically.
    #[error("Profile not found or access denied")]
    ForbiddenOrNotFound,

    /// Photo content type outside the allow-list.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Photo name contains a path separator or parent-directory segment.
    #[error("Invalid filename")]
    InvalidFilename,

    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Document or attachment I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document could not be encoded or decoded.
    #[error("Document error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// True for failures of the underlying document or attachment storage.
    pub fn is_storage(&self) -> bool {
        matches!(self, StoreError::Io(_) | StoreError::Json(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
