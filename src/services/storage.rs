use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use uuid::Uuid;

/// Route prefix under which stored files are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create upload directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Upload path {path} is not a directory")]
    NotADirectory { path: PathBuf },
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// The local directory that holds uploaded image bytes.
#[derive(Debug, Clone)]
pub struct UploadStorage {
    dir: PathBuf,
}

impl UploadStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the upload directory (and missing parents) when absent.
    pub fn ensure_dir(&self) -> Result<(), StorageError> {
        if self.dir.is_dir() {
            return Ok(());
        }
        if self.dir.exists() {
            return Err(StorageError::NotADirectory {
                path: self.dir.clone(),
            });
        }

        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        info!("Created upload directory {}", self.dir.display());
        Ok(())
    }

    /// Opens a hidden staging file in the upload directory. Bytes written to
    /// it become visible under a public name only once committed.
    pub async fn begin(&self) -> Result<PendingUpload, StorageError> {
        let path = self.dir.join(format!(".upload-{}.part", Uuid::new_v4()));

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(PendingUpload {
            dir: self.dir.clone(),
            path,
            file,
            len: 0,
            committed: false,
        })
    }
}

/// A staged upload. Dropping it without committing deletes the staging file.
#[derive(Debug)]
pub struct PendingUpload {
    dir: PathBuf,
    path: PathBuf,
    file: File,
    len: u64,
    committed: bool,
}

impl PendingUpload {
    pub async fn write(&mut self, chunk: &[u8]) -> Result<(), StorageError> {
        self.file
            .write_all(chunk)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
        self.len += chunk.len() as u64;
        Ok(())
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Publishes the staged bytes under a timestamped name and returns the
    /// public URL.
    pub async fn commit(self, original_name: &str) -> Result<String, StorageError> {
        let name = stored_name(Utc::now().timestamp_millis(), original_name);
        self.commit_as(&name).await
    }

    /// Publishes the staged bytes as `name`. Fails if `name` already exists:
    /// two uploads of the same name in the same millisecond collide here and
    /// the second one is refused instead of overwriting the first.
    pub async fn commit_as(mut self, name: &str) -> Result<String, StorageError> {
        let dest = self.dir.join(name);

        self.file
            .flush()
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;

        fs::hard_link(&self.path, &dest)
            .await
            .map_err(|source| StorageError::Write {
                path: dest.clone(),
                source,
            })?;
        self.committed = true;

        if let Err(e) = fs::remove_file(&self.path).await {
            warn!("Failed to remove staging file {}: {}", self.path.display(), e);
        }

        info!("Stored {} bytes at {}", self.len, dest.display());
        Ok(public_url(name))
    }
}

impl Drop for PendingUpload {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("Failed to discard staging file {}: {}", self.path.display(), e);
            }
        }
    }
}

pub fn stored_name(timestamp_millis: i64, original_name: &str) -> String {
    format!("{timestamp_millis}-{original_name}")
}

pub fn public_url(stored_name: &str) -> String {
    format!("{UPLOADS_ROUTE}/{stored_name}")
}

/// Reduces a client-supplied filename to its last path component. Returns
/// `None` when nothing usable is left.
pub fn sanitize_filename(name: &str) -> Option<&str> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    match base {
        "" | "." | ".." => None,
        base => Some(base),
    }
}
