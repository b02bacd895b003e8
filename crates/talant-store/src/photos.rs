//! Photo lifecycle: attach, resolve and detach the photo bound to a profile.
//!
//! File writes and removals happen while the document lock is held, together
//! with the update of the record's `photo` reference.

use talant_shared::constants::ALLOWED_PHOTO_TYPES;
use talant_shared::OwnerId;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::attachments::{extension_for, AttachmentRoot, PhotoAsset};
use crate::error::{Result, StoreError};
use crate::models::ProfileRecord;
use crate::store::ProfileStore;

/// An uploaded photo as received from the client.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// Client-side file name, used only for its extension.
    pub file_name: Option<String>,
    /// Declared content type.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: Option<&str>, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.map(str::to_string),
            content_type: content_type.to_string(),
            bytes,
        }
    }
}

pub fn is_allowed_photo_type(content_type: &str) -> bool {
    ALLOWED_PHOTO_TYPES.contains(&content_type)
}

impl ProfileStore {
    /// Store a new photo for the owner's profile and return its reference.
    ///
    /// The previous photo file, if any, is removed once the new reference
    /// has been persisted.
    pub fn attach_photo(&self, owner: &OwnerId, upload: PhotoUpload) -> Result<String> {
        if !is_allowed_photo_type(&upload.content_type) {
            return Err(StoreError::UnsupportedMediaType(upload.content_type));
        }
        if upload.bytes.is_empty() {
            return Err(StoreError::Validation("empty photo".to_string()));
        }
        if upload.bytes.len() > self.max_photo_size() {
            return Err(StoreError::PayloadTooLarge {
                size: upload.bytes.len(),
                max: self.max_photo_size(),
            });
        }

        let guard = self.lock();
        let mut records = self.read_document(&guard)?;
        let index = records
            .iter()
            .position(|r| &r.owner_id == owner)
            .ok_or(StoreError::NotFound)?;

        let ext = extension_for(upload.file_name.as_deref(), &upload.content_type);
        let name = format!("{}_{}{}", owner.file_stem(), Uuid::new_v4(), ext);
        let path = self.attachments().write(&name, &upload.bytes)?;

        let photo_ref = AttachmentRoot::photo_ref(&name);
        let previous = std::mem::replace(&mut records[index].photo, photo_ref.clone());

        if let Err(e) = self.write_document(&guard, &records) {
            self.attachments().remove_path(&path);
            return Err(e);
        }

        if !previous.is_empty() && !self.attachments().remove_ref(&previous) {
            debug!(owner = %owner, photo = %previous, "previous photo already gone");
        }

        info!(owner = %owner, photo = %photo_ref, size = upload.bytes.len(), "photo attached");
        Ok(photo_ref)
    }

    /// Read a photo by bare file name, falling back to the default avatar.
    pub fn resolve_photo(&self, name: &str) -> Result<PhotoAsset> {
        if let Err(e) = crate::attachments::validate_photo_name(name) {
            warn!(name = %name, "rejected photo name");
            return Err(e);
        }
        let _guard = self.lock();
        self.attachments().open(name)
    }

    /// Remove the owner's photo file and clear the reference. Calling it
    /// again when there is no photo left succeeds.
    pub fn detach_photo(&self, owner: &OwnerId) -> Result<()> {
        self.modify(|records| {
            let record = records
                .iter_mut()
                .find(|r| &r.owner_id == owner)
                .ok_or(StoreError::NotFound)?;
            self.detach_record(record);
            Ok(())
        })?;

        info!(owner = %owner, "photo detached");
        Ok(())
    }

    /// Remove the photo file behind `record` (missing files tolerated) and
    /// clear its reference. Caller holds the document lock.
    pub(crate) fn detach_record(&self, record: &mut ProfileRecord) {
        if record.photo.is_empty() {
            return;
        }
        self.attachments().remove_ref(&record.photo);
        record.photo.clear();
    }
}
