//! Snapshot files: `<dir>/content_<job>.html`

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::error::StorageError;
use crate::core::ports::SnapshotStore;
use crate::paths;

/// Stores each snapshot verbatim in its own file
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the snapshot, so readers see either the old or the new content.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Store snapshots under `dir` (created on first write)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the snapshots
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Snapshot file of `job_name`
    #[must_use]
    pub fn path_for(&self, job_name: &str) -> PathBuf {
        paths::snapshot_file(&self.dir, job_name)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, job_name: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(job_name);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn save(&self, job_name: &str, content: &str) -> Result<(), StorageError> {
        let path = self.path_for(job_name);
        self.write_atomic(&path, content).map_err(|source| StorageError::Write { path, source })
    }
}
