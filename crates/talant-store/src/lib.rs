//! # talant-store
//!
//! Profile record store for the Talant service, backed by a single JSON
//! document and an attachment directory for profile photos.
//!
//! The crate exposes a synchronous [`ProfileStore`] handle. Every mutation
//! runs as one load-modify-save cycle under the store's writer lock, and the
//! document is replaced by atomic rename. Search and statistics are pure
//! functions over a snapshot of records.

pub mod attachments;
pub mod models;
pub mod photos;
pub mod profiles;
pub mod search;
pub mod stats;
pub mod store;

mod error;

pub use attachments::{AttachmentRoot, PhotoAsset};
pub use error::{Result, StoreError};
pub use models::*;
pub use photos::PhotoUpload;
pub use search::{filter, SearchCriteria, SearchResult};
pub use stats::{compute, Stats};
pub use store::ProfileStore;
