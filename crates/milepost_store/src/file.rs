//! File-based store backend for persistent storage.

use crate::backend::StoreBackend;
use crate::error::StoreResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A file-based store backend.
///
/// Each key is stored as one UTF-8 file named `<key>.json` under a data
/// directory. Data survives process restarts.
///
/// # Durability
///
/// Writes go through `std::fs::write`, which replaces the file contents in
/// one call. There is no fsync; a crash mid-write can lose the most recent
/// save of that one key.
///
/// # Example
///
/// ```no_run
/// use milepost_store::{FileBackend, StoreBackend};
/// use std::path::Path;
///
/// let backend = FileBackend::open(Path::new("/tmp/milepost-data")).unwrap();
/// backend.put("milepost_users", "[]").unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Opens a file backend rooted at `dir`, creating the directory (and
    /// parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Returns the data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StoreBackend for FileBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("data");
        let backend = FileBackend::open(&dir).unwrap();
        assert!(backend.dir().is_dir());
    }

    #[test]
    fn file_put_then_get() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(tmp.path()).unwrap();

        backend.put("k", "value").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn file_missing_key_reads_none() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(tmp.path()).unwrap();
        assert_eq!(backend.get("missing").unwrap(), None);
    }

    #[test]
    fn file_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let backend = FileBackend::open(tmp.path()).unwrap();
            backend.put("k", "persisted").unwrap();
        }
        let backend = FileBackend::open(tmp.path()).unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn file_remove_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(tmp.path()).unwrap();
        backend.put("k", "v").unwrap();
        backend.remove("k").unwrap();
        backend.remove("k").unwrap();
        assert_eq!(backend.get("k").unwrap(), None);
    }
}
