//! Document handle management.
//!
//! The [`ProfileStore`] owns the path of the profile document, the attachment
//! root and the writer lock. Every read and every load-modify-save cycle goes
//! through [`ProfileStore::lock`], so concurrent requests never interleave
//! their rewrites of the document.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use talant_shared::constants::MAX_PHOTO_SIZE;

use crate::attachments::AttachmentRoot;
use crate::error::Result;
use crate::models::ProfileRecord;

/// Proof that the caller holds the document lock.
pub(crate) struct DocumentGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

/// Handle to the profile document and its photo attachments.
pub struct ProfileStore {
    document: PathBuf,
    attachments: AttachmentRoot,
    max_photo_size: usize,
    lock: Mutex<()>,
}

impl ProfileStore {
    /// Create a handle for the document at `document` with photos stored
    /// under `upload_dir`.
    ///
    /// Nothing is touched on disk until the first operation; a missing
    /// document is materialized as an empty collection then.
    pub fn new(document: impl Into<PathBuf>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            attachments: AttachmentRoot::new(upload_dir),
            max_photo_size: MAX_PHOTO_SIZE,
            lock: Mutex::new(()),
        }
    }

    /// Override the maximum accepted photo size in bytes.
    pub fn with_max_photo_size(mut self, max: usize) -> Self {
        self.max_photo_size = max;
        self
    }

    pub fn document_path(&self) -> &Path {
        &self.document
    }

    pub fn attachments(&self) -> &AttachmentRoot {
        &self.attachments
    }

    pub fn max_photo_size(&self) -> usize {
        self.max_photo_size
    }

    /// Return every record, creating an empty document if none exists.
    pub fn load(&self) -> Result<Vec<ProfileRecord>> {
        let guard = self.lock();
        self.read_document(&guard)
    }

    /// Replace the whole document with `records`.
    pub fn save(&self, records: &[ProfileRecord]) -> Result<()> {
        let guard = self.lock();
        self.write_document(&guard, records)
    }

    /// Acquire the writer lock.
    ///
    /// The lock guards no data of its own (the document on disk is the
    /// state), so a panic in another holder leaves nothing to repair.
    pub(crate) fn lock(&self) -> DocumentGuard<'_> {
        DocumentGuard {
            _guard: self.lock.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Run `f` over the loaded collection and persist the result if it
    /// succeeds. The whole cycle holds the lock.
    pub(crate) fn modify<T>(
        &self,
        f: impl FnOnce(&mut Vec<ProfileRecord>) -> Result<T>,
    ) -> Result<T> {
        let guard = self.lock();
        let mut records = self.read_document(&guard)?;
        let out = f(&mut records)?;
        self.write_document(&guard, &records)?;
        Ok(out)
    }

    /// Read-only access to a snapshot of the collection.
    pub(crate) fn read<T>(&self, f: impl FnOnce(&[ProfileRecord]) -> T) -> Result<T> {
        let records = self.load()?;
        Ok(f(&records))
    }

    pub(crate) fn read_document(&self, guard: &DocumentGuard<'_>) -> Result<Vec<ProfileRecord>> {
        if !self.document.exists() {
            tracing::info!(path = %self.document.display(), "profile document not found, creating");
            let empty = Vec::new();
            self.write_document(guard, &empty)?;
            return Ok(empty);
        }

        let data = fs::read(&self.document)?;
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let records: Vec<ProfileRecord> = serde_json::from_slice(&data).map_err(|e| {
            tracing::error!(path = %self.document.display(), error = %e, "unparseable profile document");
            e
        })?;

        tracing::debug!(count = records.len(), "loaded profiles");
        Ok(records)
    }

    /// Write to a sibling temp file, then rename it over the document so
    /// readers never observe a partial write.
    pub(crate) fn write_document(
        &self,
        _guard: &DocumentGuard<'_>,
        records: &[ProfileRecord],
    ) -> Result<()> {
        if let Some(parent) = self.document.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let payload = serde_json::to_vec_pretty(records)?;
        let tmp_path = self.document.with_extension("json.tmp");

        let written = fs::File::create(&tmp_path).and_then(|mut file| {
            file.write_all(&payload)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&tmp_path, &self.document)) {
            let _ = fs::remove_file(&tmp_path);
            tracing::error!(path = %self.document.display(), error = %e, "failed writing profile document");
            return Err(e.into());
        }

        tracing::debug!(count = records.len(), "saved profiles");
        Ok(())
    }
}
