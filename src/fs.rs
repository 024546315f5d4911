use std::path::Path;

use crate::error::{Result, TierconfError};

/// Check that `path` exists and names a regular file (anything but a directory).
///
/// - Empty path → [`TierconfError::NotAFile`].
/// - Stat reports `NotFound` → [`TierconfError::NotExist`] carrying the io error.
/// - Path is a directory → [`TierconfError::NotAFile`].
///
/// Any other stat failure (permissions, etc.) surfaces as [`TierconfError::Io`].
pub fn is_file(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(TierconfError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TierconfError::NotExist {
                path: path.to_path_buf(),
                source: e,
            });
        }
        Err(e) => {
            return Err(TierconfError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if meta.is_dir() {
        return Err(TierconfError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
