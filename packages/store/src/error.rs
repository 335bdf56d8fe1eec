//! Error types for store operations.
//!
//! Every operation returns a `StoreError` rather than logging and
//! continuing; the caller decides what a failure means.

use std::io;
use std::path::PathBuf;

/// Errors produced by store operations.
///
/// Four kinds: name validation (raised before any I/O or locking),
/// not-found, filesystem failures (with the operation that failed and the
/// path it failed on), and JSON encode/decode failures.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The collection name was empty.
    #[error("missing collection name")]
    MissingCollection,

    /// The resource name was empty.
    #[error("missing resource name")]
    MissingResource,

    /// No record or collection exists at the attempted path.
    #[error("nothing exists at '{}'", .path.display())]
    NotFound { path: PathBuf },

    /// A filesystem operation failed. Propagated verbatim, never retried.
    #[error("{op} failed for '{}': {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The value could not be serialized to JSON.
    #[error("failed to encode record as JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// The on-disk document is not valid JSON for the requested type.
    #[error("failed to decode record from JSON: {0}")]
    Decode(#[source] serde_json::Error),
}
