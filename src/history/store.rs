//! Durable key-value media for the history cache.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

/// Opaque blob storage addressed by key.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;
    /// Replace the blob under `key`. On error the previous blob must be intact.
    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()>;
    /// Remove `key`; removing a missing key succeeds.
    fn delete(&self, key: &str) -> io::Result<()>;
}

/// One JSON file per key inside a directory.
///
/// Writes land in a temporary file in the same directory which is then renamed
/// over the target, so readers only ever see a complete blob.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;

        Ok(())
    }

    fn delete(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Process-local store.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: std::sync::Mutex<std::collections::HashMap<String, Vec<u8>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let blobs = self.blobs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> io::Result<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        blobs.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).write(key, bytes)
    }

    fn delete(&self, key: &str) -> io::Result<()> {
        (**self).delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.read("history").unwrap(), None);
        store.write("history", b"[1,2,3]").unwrap();
        assert_eq!(store.read("history").unwrap().as_deref(), Some(&b"[1,2,3]"[..]));

        store.write("history", b"[]").unwrap();
        assert_eq!(store.read("history").unwrap().as_deref(), Some(&b"[]"[..]));
        assert!(dir.path().join("nested").join("history.json").exists());
    }

    #[test]
    fn test_file_store_delete_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.delete("history").unwrap();
        store.write("history", b"x").unwrap();
        store.delete("history").unwrap();
        assert_eq!(store.read("history").unwrap(), None);
    }

    #[test]
    fn test_file_store_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        for i in 0..5 {
            store.write("history", format!("[{}]", i).as_bytes()).unwrap();
        }
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.write("k", b"v").unwrap();
        assert_eq!(store.read("k").unwrap(), Some(b"v".to_vec()));
        store.delete("k").unwrap();
        store.delete("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
    }
}
