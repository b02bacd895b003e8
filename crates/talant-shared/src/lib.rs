//! # talant-shared
//!
//! Types shared between the profile store and the HTTP server: owner and
//! profile identifiers, storage constants, and verification of the session
//! JWTs issued by the external auth service.

pub mod constants;
pub mod error;
pub mod session;
pub mod types;

pub use error::SessionError;
pub use session::{Caller, SessionClaims, SessionKeys};
pub use types::{OwnerId, ProfileId};
