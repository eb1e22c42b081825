//! Write-then-rename file replacement.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Removes the temporary file on drop unless the write was committed.
struct TempFile {
    path: PathBuf,
    committed: bool,
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Writes `bytes` next to `path` and renames the result into place, so readers
/// never observe a half-written file.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut temp_name = path
        .file_name()
        .map(ToOwned::to_owned)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    temp_name.push(".tmp");

    let mut temp = TempFile {
        path: path.with_file_name(temp_name),
        committed: false,
    };
    fs::write(&temp.path, bytes)?;
    fs::rename(&temp.path, path)?;
    temp.committed = true;
    Ok(())
}
