use crate::error::PatchError;
use log::{debug, trace};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reads the whole file at `path` as strict UTF-8.
pub fn load(path: &Path) -> Result<String, PatchError> {
    let bytes = fs::read(path).map_err(|e| PatchError::from_io(path, e))?;
    trace!("read {} bytes from {:?}", bytes.len(), path);

    String::from_utf8(bytes).map_err(|e| PatchError::Decode {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })
}

/// Atomically replaces the content of `path` with `content`.
pub fn save(path: &Path, content: &str) -> Result<(), PatchError> {
    save_with(path, |file| file.write_all(content.as_bytes()))
}

/// Writes a temporary file next to the real target with `write_body`, then
/// renames it over the target. Symlinks are followed, so the file they point
/// at is what gets replaced. The target is either fully replaced or left as
/// it was; the temporary file never outlives this call unless it became the
/// target.
pub fn save_with<F>(path: &Path, write_body: F) -> Result<(), PatchError>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let to_err = |e: io::Error| PatchError::from_io(path, e);

    let target = resolve_target(path)?;
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let existing = fs::metadata(&target).ok();
    if let Some(meta) = &existing {
        // rename(2) only needs a writable directory; refuse what the user
        // could not open for writing.
        if meta.permissions().readonly() {
            return Err(PatchError::Permission {
                path: path.to_path_buf(),
            });
        }
        OpenOptions::new()
            .write(true)
            .open(&target)
            .map_err(to_err)?;
    }

    let mut tmp = NamedTempFile::new_in(dir).map_err(to_err)?;
    debug!("staging write for {:?} in {:?}", target, tmp.path());

    write_body(tmp.as_file_mut()).map_err(to_err)?;
    tmp.as_file_mut().flush().map_err(to_err)?;
    tmp.as_file().sync_all().map_err(to_err)?;

    // NamedTempFile is created 0600; keep whatever mode the target had.
    if let Some(meta) = existing {
        fs::set_permissions(tmp.path(), meta.permissions()).map_err(to_err)?;
    }

    tmp.persist(&target).map_err(|e| to_err(e.error))?;
    debug!("replaced {:?}", target);
    Ok(())
}

/// Follows symlinks to the file that actually holds the content. A path
/// that does not exist yet is used as given; a dangling link is an error.
fn resolve_target(path: &Path) -> Result<PathBuf, PatchError> {
    match fs::canonicalize(path) {
        Ok(real) => Ok(real),
        Err(e) if e.kind() == io::ErrorKind::NotFound && fs::symlink_metadata(path).is_err() => {
            Ok(path.to_path_buf())
        }
        Err(e) => Err(PatchError::from_io(path, e)),
    }
}
