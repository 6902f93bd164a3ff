use crate::error::{KccError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Prevents partial writes from corrupting source files.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let mut tmp = tempfile_beside(path)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create `path` with `data`, failing with `Collision` if it already exists.
///
/// Parents are created as needed. The final rename refuses to replace a file
/// that appeared after the existence check.
pub fn write_new(path: &Path, data: &[u8]) -> Result<()> {
    if path.exists() {
        return Err(KccError::Collision(path.display().to_string()));
    }
    let mut tmp = tempfile_beside(path)?;
    tmp.write_all(data)?;
    tmp.persist_noclobber(path).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            KccError::Collision(path.display().to_string())
        } else {
            KccError::Io(e.error)
        }
    })?;
    Ok(())
}

fn tempfile_beside(path: &Path) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    Ok(NamedTempFile::new_in(dir)?)
}
