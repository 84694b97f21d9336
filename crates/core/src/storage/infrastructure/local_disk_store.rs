use std::fs;
use std::io;
use std::path::Path;

use crate::storage::domain::image_store::ImageStore;

/// Local filesystem implementation of [`ImageStore`].
///
/// Entries are returned sorted by name: `read_dir` order is
/// platform-dependent, and a stable listing keeps runs reproducible.
pub struct LocalDiskStore;

impl LocalDiskStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalDiskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStore for LocalDiskStore {
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                entries.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_entries_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2-b.png"), b"x").unwrap();
        fs::write(dir.path().join("1-a.png"), b"x").unwrap();
        fs::write(dir.path().join("10-c.png"), b"x").unwrap();

        let store = LocalDiskStore::new();
        let entries = store.list_entries(dir.path()).unwrap();
        assert_eq!(entries, vec!["1-a.png", "10-c.png", "2-b.png"]);
    }

    #[test]
    fn test_list_entries_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1-a.png"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let store = LocalDiskStore::new();
        let entries = store.list_entries(dir.path()).unwrap();
        assert_eq!(entries, vec!["1-a.png"]);
    }

    #[test]
    fn test_list_entries_missing_directory_errors() {
        let store = LocalDiskStore::new();
        assert!(store.list_entries(Path::new("/nonexistent/gallery")).is_err());
    }

    #[test]
    fn test_read_bytes_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1-a.png");
        fs::write(&path, b"pixels").unwrap();

        let store = LocalDiskStore::new();
        assert_eq!(store.read_bytes(&path).unwrap(), b"pixels");
    }

    #[test]
    fn test_read_bytes_missing_file_errors() {
        let store = LocalDiskStore::new();
        assert!(store.read_bytes(Path::new("/nonexistent/1-a.png")).is_err());
    }
}
