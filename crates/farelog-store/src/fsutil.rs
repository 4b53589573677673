//! Shared file plumbing for the flat-file stores.

use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use farelog_error::{FareError, Result};
use tracing::debug;

/// Sibling temp path used during rewrites (`<store>.tmp`).
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}

/// Read the whole file, or `None` if it does not exist.
pub(crate) fn read_all(path: &Path) -> Result<Option<Vec<u8>>> {
    let mut file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(_) => {
            return Err(FareError::CannotOpen {
                path: path.to_path_buf(),
            })
        }
    };
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(Some(buf))
}

/// Replace `path` with `bytes` via a sibling temp file.
///
/// Survivors are written to `<path>.tmp`, the original is deleted,
/// and the temp file renamed into place. There is no transactional
/// guarantee: an interruption between delete and rename loses the
/// store. A known durability gap; closing it is out of scope.
pub(crate) fn replace_with(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp = temp_path(path);
    {
        let mut file = fs::File::create(&temp).map_err(|_| FareError::CannotOpen {
            path: temp.clone(),
        })?;
        file.write_all(bytes)?;
        file.flush()?;
    }
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }
    fs::rename(&temp, path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "rewrote store file");
    Ok(())
}

/// Delete `path`; a missing file is not an error.
pub(crate) fn remove_if_present(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}
