//! Delimited text file layer.
//!
//! [`from_file`] validates the path with [`is_file`](crate::fs::is_file) first, so a
//! missing file or a directory is reported as such rather than as a generic read
//! error. The file handle lives only inside [`from_file`] and is closed on every
//! return path.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Result, TierconfError};
use crate::fs::is_file;
use crate::parse::{FileFormat, parse};
use crate::store::Setter;
use crate::value::Value;

/// Load the requested keys from the file at `path`.
///
/// Keys are matched case-insensitively against the file (file keys are
/// upper-cased on parse) and written under the caller's spelling. Succeeds even
/// when no key matched.
pub fn from_file<S: Setter + ?Sized>(
    path: &Path,
    keys: &[&str],
    sink: &mut S,
    format: &FileFormat,
) -> Result<()> {
    is_file(path)?;
    let file = std::fs::File::open(path).map_err(|e| TierconfError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let written = load(file, path, keys, sink, format)?;
    debug!(source = "file", path = %path.display(), written, "loaded config file");
    Ok(())
}

/// Load the requested keys from any reader, e.g. an in-memory buffer.
///
/// The whole input is read before parsing. Invalid UTF-8 is replaced rather
/// than rejected.
pub fn from_reader<R, S>(reader: R, keys: &[&str], sink: &mut S, format: &FileFormat) -> Result<()>
where
    R: Read,
    S: Setter + ?Sized,
{
    let written = load(reader, Path::new("<reader>"), keys, sink, format)?;
    debug!(source = "reader", written, "loaded config text");
    Ok(())
}

fn load<R, S>(
    mut reader: R,
    origin: &Path,
    keys: &[&str],
    sink: &mut S,
    format: &FileFormat,
) -> Result<usize>
where
    R: Read,
    S: Setter + ?Sized,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| TierconfError::Io {
            path: PathBuf::from(origin),
            source: e,
        })?;
    let text = String::from_utf8_lossy(&bytes);
    let entries = parse(&text, format)?;

    let mut written = 0;
    for key in keys {
        if let Some(value) = entries.get(&key.to_uppercase()) {
            trace!(key = %key, "file value found");
            sink.set(key, Value::Str(value.clone()));
            written += 1;
        }
    }
    Ok(written)
}
