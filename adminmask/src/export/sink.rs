//! The host-supplied file-save capability.

use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tracing::debug;

use crate::{atomic::write_atomically, error::ExportError};

/// Saves a finished export somewhere the user can get at it.
///
/// A browser bridge would trigger a download; [`DirectorySink`] writes a file;
/// [`MemorySink`] keeps the bytes for inspection.
pub trait FileSink {
    fn save_file(&self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<(), ExportError>;
}

impl<T: FileSink + ?Sized> FileSink for &T {
    fn save_file(&self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<(), ExportError> {
        (**self).save_file(bytes, filename, mime_type)
    }
}

impl<T: FileSink + ?Sized> FileSink for Arc<T> {
    fn save_file(&self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<(), ExportError> {
        (**self).save_file(bytes, filename, mime_type)
    }
}

/// Writes exports into a directory, creating it if needed.
///
/// Files are written to a temporary name and renamed into place; the
/// temporary file is removed on every failure path.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `filename` would be written. Rejects names that are empty, hidden
    /// or contain a path separator.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf, ExportError> {
        if filename.is_empty() || filename.starts_with('.') || filename.contains(['/', '\\']) {
            return Err(ExportError::InvalidFilename {
                filename: filename.to_string(),
            });
        }
        Ok(self.dir.join(filename))
    }
}

impl FileSink for DirectorySink {
    fn save_file(&self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<(), ExportError> {
        let path = self.path_for(filename)?;
        let save_error = |source| ExportError::Save {
            filename: filename.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(save_error)?;
        write_atomically(&path, bytes).map_err(save_error)?;
        debug!(path = %path.display(), mime_type, "export written");
        Ok(())
    }
}

/// One file captured by [`MemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SavedFile {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Captures saved files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<SavedFile>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files saved so far, oldest first.
    pub fn files(&self) -> Vec<SavedFile> {
        self.files
            .lock()
            .map(|files| files.clone())
            .unwrap_or_default()
    }
}

impl FileSink for MemorySink {
    fn save_file(&self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<(), ExportError> {
        let mut files = self.files.lock().map_err(|_| ExportError::Poisoned)?;
        files.push(SavedFile {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}
