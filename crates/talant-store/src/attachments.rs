//! Photo files under the attachment root.
//!
//! Photos live in `<root>/photos/` and are referenced from profile records as
//! `photos/<file>`. Every path handed out by [`AttachmentRoot`] is checked to
//! stay inside the root.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use talant_shared::constants::{DEFAULT_AVATAR, OCTET_STREAM, PHOTO_DIR};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};

/// A resolved photo, ready to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAsset {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    /// True when the requested file was missing and the default avatar was used.
    pub fallback: bool,
}

/// Reject names that could escape the photo directory.
pub fn validate_photo_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(StoreError::InvalidFilename);
    }
    Ok(())
}

/// Content type derived from the file extension, case-insensitively.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => OCTET_STREAM,
    }
}

/// Extension (with leading dot) for a stored photo: the uploaded file's own
/// extension when it has a usable one, otherwise one matching the content type.
pub fn extension_for(file_name: Option<&str>, content_type: &str) -> String {
    let original = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase);

    if let Some(ext) = original {
        return format!(".{ext}");
    }

    let base = content_type.split(';').next().unwrap_or(content_type).trim();
    match base {
        "image/png" => ".png",
        "image/jpeg" | "image/jpg" => ".jpg",
        "image/gif" => ".gif",
        _ => "",
    }
    .to_string()
}

/// Verify that a resolved path stays within the expected base directory.
fn ensure_within(base: &Path, target: &Path) -> Result<PathBuf> {
    let mut resolved = base.to_path_buf();
    for component in target.strip_prefix(base).unwrap_or(target).components() {
        match component {
            Component::Normal(c) => resolved.push(c),
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(StoreError::InvalidFilename);
            }
            Component::CurDir => {}
        }
    }
    if !resolved.starts_with(base) {
        return Err(StoreError::InvalidFilename);
    }
    Ok(resolved)
}

#[derive(Debug, Clone)]
pub struct AttachmentRoot {
    root: PathBuf,
}

impl AttachmentRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn photo_dir(&self) -> PathBuf {
        self.root.join(PHOTO_DIR)
    }

    /// Path of a photo file by bare name.
    pub fn photo_path(&self, name: &str) -> Result<PathBuf> {
        validate_photo_name(name)?;
        let dir = self.photo_dir();
        ensure_within(&dir, &dir.join(name))
    }

    /// Reference stored in a profile record for a photo file name.
    pub fn photo_ref(name: &str) -> String {
        format!("{PHOTO_DIR}/{name}")
    }

    /// Path behind a stored `photos/<file>` reference. `None` if the
    /// reference is not of that shape, which only happens when the document
    /// was edited by hand.
    pub fn path_for_ref(&self, photo_ref: &str) -> Option<PathBuf> {
        let name = photo_ref.strip_prefix(PHOTO_DIR)?.strip_prefix('/')?;
        self.photo_path(name).ok()
    }

    /// Write a photo file, creating the photo directory on first use.
    pub fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.photo_path(name)?;
        fs::create_dir_all(self.photo_dir())?;
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), size = bytes.len(), "stored photo");
        Ok(path)
    }

    /// Best-effort removal of the file behind a stored reference.
    ///
    /// Returns whether a file was removed. A missing file is not an error;
    /// other failures are logged and swallowed.
    pub fn remove_ref(&self, photo_ref: &str) -> bool {
        if photo_ref.is_empty() {
            return false;
        }
        let Some(path) = self.path_for_ref(photo_ref) else {
            warn!(photo = %photo_ref, "ignoring malformed photo reference");
            return false;
        };
        self.remove_path(&path)
    }

    pub(crate) fn remove_path(&self, path: &Path) -> bool {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed photo");
                true
            }
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to remove photo");
                false
            }
        }
    }

    /// Read a photo by bare name, falling back to the default avatar.
    pub fn open(&self, name: &str) -> Result<PhotoAsset> {
        let requested = self.photo_path(name)?;

        let (path, fallback) = if requested.is_file() {
            (requested, false)
        } else {
            let default = self.photo_dir().join(DEFAULT_AVATAR);
            if !default.is_file() {
                return Err(StoreError::NotFound);
            }
            debug!(requested = %name, "photo missing, serving default avatar");
            (default, true)
        };

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(e.into()),
        };

        Ok(PhotoAsset {
            content_type: content_type_for(&path),
            bytes,
            fallback,
        })
    }
}
