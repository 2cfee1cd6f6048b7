//! Uploaded photo files, tracked only by their stored names.
//!
//! A stored name is `{uuid}_{original filename}`, generated fresh for every
//! save so concurrent uploads can never collide and a name is never reused
//! within a process lifetime.

use async_trait::async_trait;
use log::warn;
use uuid::Uuid;

use crate::errors::DirectoryError;

pub mod fs;
pub mod s3;

pub use fs::FsPhotoStore;
pub use s3::S3PhotoStore;

/// Builds a collision-resistant stored name from the uploader's filename.
/// Path separators in the hint are stripped so a hostile filename cannot
/// escape the content root.
pub(crate) fn generate_stored_name(filename_hint: &str) -> String {
    let base = filename_hint
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename_hint);
    let safe: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("{}_{}", Uuid::new_v4(), safe)
}

/// Binary photo storage under an externally-configured location (a content
/// root directory or an S3 bucket).
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Writes the bytes under a freshly generated stored name and returns it.
    /// The write is all-or-nothing: a failure leaves no file behind.
    async fn save(&self, filename_hint: &str, bytes: &[u8]) -> Result<String, DirectoryError>;

    /// Removes the file. Deleting an already-absent file is not an error.
    async fn delete(&self, stored_name: &str) -> Result<(), DirectoryError>;

    /// Reads the file back; `None` when no such stored name exists.
    async fn open(&self, stored_name: &str) -> Result<Option<Vec<u8>>, DirectoryError>;

    /// Saves the new photo, then deletes the old one. The old file is only
    /// touched after the new one is confirmed written, so a failure mid-way
    /// never leaves the employee without a usable photo. A failed delete of
    /// the old file is non-fatal; the leak is logged so it stays discoverable.
    async fn replace(
        &self,
        old_stored_name: Option<&str>,
        filename_hint: &str,
        bytes: &[u8],
    ) -> Result<String, DirectoryError> {
        let stored_name = self.save(filename_hint, bytes).await?;
        if let Some(old) = old_stored_name {
            if let Err(err) = self.delete(old).await {
                warn!("replace left old photo '{}' behind: {}", old, err);
            }
        }
        Ok(stored_name)
    }
}
