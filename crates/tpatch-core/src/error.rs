use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("decode error: {} is not valid UTF-8 (first invalid byte at offset {offset})", path.display())]
    Decode { path: PathBuf, offset: usize },

    #[error("permission denied: {}", path.display())]
    Permission { path: PathBuf },

    #[error("disk full: could not write {}", path.display())]
    DiskFull { path: PathBuf },

    #[error("pattern not found: search block does not occur in {}", path.display())]
    PatternNotFound { path: PathBuf },

    #[error("empty search block for {}", path.display())]
    EmptySearch { path: PathBuf },

    #[error("i/o error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PatchError {
    /// Classifies an I/O failure on `path` into one of the reported kinds.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => PatchError::NotFound { path },
            io::ErrorKind::PermissionDenied => PatchError::Permission { path },
            io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded => {
                PatchError::DiskFull { path }
            }
            _ => PatchError::Io { path, source: err },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            PatchError::NotFound { path }
            | PatchError::Decode { path, .. }
            | PatchError::Permission { path }
            | PatchError::DiskFull { path }
            | PatchError::PatternNotFound { path }
            | PatchError::EmptySearch { path }
            | PatchError::Io { path, .. } => path,
        }
    }
}
