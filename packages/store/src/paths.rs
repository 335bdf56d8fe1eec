//! Pure translation between logical names and filesystem paths.
//!
//! Nothing here creates or removes anything; `locate_existing` is the one
//! function that touches the filesystem, and only to stat.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

/// Filename suffix for record documents, including the dot.
pub(crate) const RECORD_SUFFIX: &str = ".json";

/// Suffix for the transient write artifact, appended after [`RECORD_SUFFIX`].
pub(crate) const TEMP_SUFFIX: &str = ".tmp";

/// Directory holding a collection's records.
pub(crate) fn collection_dir(root: &Path, collection: &str) -> PathBuf {
    root.join(collection)
}

/// Final on-disk path of a record: `<root>/<collection>/<resource>.json`.
pub(crate) fn record_path(root: &Path, collection: &str, resource: &str) -> PathBuf {
    root.join(collection)
        .join(format!("{}{}", resource, RECORD_SUFFIX))
}

/// Append a literal suffix to a path, extension or not.
///
/// `Path::set_extension` would eat an existing extension; records are named
/// by exact string concatenation (`alice` -> `alice.json`,
/// `alice.json` -> `alice.json.tmp`).
pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut joined = path.as_os_str().to_os_string();
    joined.push(suffix);
    PathBuf::from(joined)
}

/// Stat `path` as given, retrying with a `.json` suffix if it does not
/// exist.
///
/// Returns the path that was actually found together with its metadata, so
/// callers may pass a bare resource name, a name already carrying the
/// suffix, or a collection directory. Any error other than not-found on the
/// first attempt is returned as-is.
pub(crate) fn locate_existing(path: &Path) -> io::Result<(PathBuf, Metadata)> {
    match fs::metadata(path) {
        Ok(meta) => Ok((path.to_path_buf(), meta)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let suffixed = with_suffix(path, RECORD_SUFFIX);
            let meta = fs::metadata(&suffixed)?;
            Ok((suffixed, meta))
        }
        Err(err) => Err(err),
    }
}
