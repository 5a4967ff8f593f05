use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use crate::error::Result;

/// A saved upload whose backing file is removed when the guard drops, so the
/// temporary file is gone on every exit path.
pub struct UploadGuard {
    path: PathBuf,
}

impl UploadGuard {
    /// Persist uploaded bytes under `dir` as `upload_<uuid>.<ext>`, keeping
    /// only the declared extension from the client-supplied name.
    pub fn save(dir: &Path, original_name: &str, bytes: &[u8]) -> Result<Self> {
        let file_name = match Path::new(original_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("upload_{}.{}", Uuid::new_v4(), ext),
            None => format!("upload_{}", Uuid::new_v4()),
        };

        fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        fs::write(&path, bytes)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove upload");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_extension_and_removes_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let guard = UploadGuard::save(dir.path(), "notes.txt", b"Hello world").unwrap();
            let path = guard.path().to_path_buf();
            assert!(path.exists());
            assert_eq!(path.extension().unwrap(), "txt");
            assert_eq!(fs::read(&path).unwrap(), b"Hello world");
            path
        };
        assert!(!path.exists());
    }

    #[test]
    fn removes_file_when_dropped_during_unwind() {
        let dir = tempfile::tempdir().unwrap();
        let guard = UploadGuard::save(dir.path(), "notes.txt", b"data").unwrap();
        let path = guard.path().to_path_buf();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _held = guard;
            panic!("request failed");
        }));
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn handles_names_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let guard = UploadGuard::save(dir.path(), "README", b"text").unwrap();
        assert!(guard.path().extension().is_none());
    }
}
