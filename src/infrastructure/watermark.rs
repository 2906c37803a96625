//! Watermark persistence
//!
//! A single-line text file holding the sequence id of the last processed
//! direct message. Absent or empty means no prior watermark (fetch
//! everything). Writes overwrite; nothing is ever appended.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::application::errors::StorageError;

pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored watermark, if any.
    pub fn load(&self) -> Result<Option<u64>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        content
            .parse::<u64>()
            .map(Some)
            .map_err(|_| StorageError::Malformed(content.to_string()))
    }

    /// Overwrite the stored watermark with `id`.
    pub fn store(&self, id: u64) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, id.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absent_file_means_no_watermark() {
        let dir = TempDir::new().unwrap();
        let store = WatermarkStore::new(dir.path().join("last.txt"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn empty_file_means_no_watermark() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last.txt");
        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(WatermarkStore::new(path).load().unwrap(), None);
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = WatermarkStore::new(dir.path().join("last.txt"));
        store.store(12345).unwrap();
        assert_eq!(store.load().unwrap(), Some(12345));
    }

    #[test]
    fn store_overwrites_rather_than_appends() {
        let dir = TempDir::new().unwrap();
        let store = WatermarkStore::new(dir.path().join("last.txt"));
        store.store(1).unwrap();
        store.store(2).unwrap();
        assert_eq!(store.load().unwrap(), Some(2));
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "2");
    }

    #[test]
    fn garbage_content_is_a_malformed_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last.txt");
        std::fs::write(&path, "not-a-number").unwrap();
        let err = WatermarkStore::new(path).load().unwrap_err();
        assert!(matches!(err, StorageError::Malformed(_)));
    }
}
