use thiserror::Error;

/// Reasons a session token is refused.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Malformed session token")]
    Malformed,

    #[error("Invalid session signature")]
    BadSignature,

    #[error("Session expired")]
    Expired,
}
