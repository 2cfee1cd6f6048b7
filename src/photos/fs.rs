use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::errors::DirectoryError;

use super::{generate_stored_name, PhotoStore};

fn photo_error(context: &str, err: std::io::Error) -> DirectoryError {
    DirectoryError::PhotoStoreUnavailable(format!("{}: {}", context, err))
}

/// Photo store over a local content root directory (the equivalent of an
/// images folder under a web root). The root path comes from external
/// configuration; this store treats it as opaque.
pub struct FsPhotoStore {
    root: PathBuf,
}

impl FsPhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsPhotoStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn save(&self, filename_hint: &str, bytes: &[u8]) -> Result<String, DirectoryError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| photo_error("creating content root", e))?;

        let stored_name = generate_stored_name(filename_hint);
        let final_path = self.root.join(&stored_name);
        // Write to a temp name first and rename into place, so a failed or
        // interrupted write never leaves a half-written photo under the
        // stored name.
        let tmp_path = self.root.join(format!(".tmp-{}", Uuid::new_v4()));

        if let Err(err) = fs::write(&tmp_path, bytes).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(photo_error("writing photo", err));
        }
        if let Err(err) = fs::rename(&tmp_path, &final_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(photo_error("publishing photo", err));
        }
        Ok(stored_name)
    }

    async fn delete(&self, stored_name: &str) -> Result<(), DirectoryError> {
        match fs::remove_file(self.root.join(stored_name)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(photo_error("deleting photo", err)),
        }
    }

    async fn open(&self, stored_name: &str) -> Result<Option<Vec<u8>>, DirectoryError> {
        match fs::read(self.root.join(stored_name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(photo_error("reading photo", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn save_then_open_round_trips() {
        let dir = tempdir().unwrap();
        let store = FsPhotoStore::new(dir.path());
        let stored = store.save("face.png", b"pixels").await.unwrap();
        assert_eq!(store.open(&stored).await.unwrap().unwrap(), b"pixels");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FsPhotoStore::new(dir.path());
        let stored = store.save("face.png", b"pixels").await.unwrap();
        store.delete(&stored).await.unwrap();
        store.delete(&stored).await.unwrap();
        assert!(store.open(&stored).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn replace_swaps_old_for_new() {
        let dir = tempdir().unwrap();
        let store = FsPhotoStore::new(dir.path());
        let old = store.save("face.png", b"old pixels").await.unwrap();
        let new = store
            .replace(Some(&old), "face2.png", b"new pixels")
            .await
            .unwrap();
        assert!(store.open(&old).await.unwrap().is_none());
        assert_eq!(store.open(&new).await.unwrap().unwrap(), b"new pixels");
    }

    #[tokio::test]
    async fn replace_without_old_is_a_plain_save() {
        let dir = tempdir().unwrap();
        let store = FsPhotoStore::new(dir.path());
        let stored = store.replace(None, "face.png", b"pixels").await.unwrap();
        assert!(store.open(&stored).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn no_temp_files_survive_a_save() {
        let dir = tempdir().unwrap();
        let store = FsPhotoStore::new(dir.path());
        store.save("face.png", b"pixels").await.unwrap();
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            let name = entry.file_name().to_string_lossy().to_string();
            assert!(!name.starts_with(".tmp-"), "temp file left behind: {}", name);
        }
    }
}
