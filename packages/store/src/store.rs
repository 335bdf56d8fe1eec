//! The store driver.
//!
//! A [`Store`] maps collections to directories under a root and records to
//! one JSON document each. Record mutations take the owning collection's
//! exclusive lock and commit through a temp-file-plus-rename, so a reader
//! never observes a partially written document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::PoisonError;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::locks::LockRegistry;
use crate::logger::{ConsoleLogger, Logger};
use crate::paths;

/// Open-time configuration for a [`Store`].
#[derive(Default)]
pub struct Options {
    /// Diagnostics provider. `None` selects a [`ConsoleLogger`] at Info.
    pub logger: Option<Box<dyn Logger>>,
}

/// An embedded document store rooted at one directory.
///
/// All operations take `&self`; share one instance across threads to get
/// per-collection serialization of writes and deletes. Reads take no lock.
pub struct Store {
    root: PathBuf,
    locks: LockRegistry,
    log: Box<dyn Logger>,
}

impl Store {
    /// Open the store rooted at `root`, creating the directory tree
    /// (including intermediate directories) on first use.
    ///
    /// An existing root is the common reopen case, not an error.
    pub fn open(root: impl AsRef<Path>, options: Options) -> Result<Store, StoreError> {
        let root = root.as_ref();
        let log = options
            .logger
            .unwrap_or_else(|| Box::new(ConsoleLogger::default()));

        match fs::metadata(root) {
            Ok(_) => {
                log.debug(&format!(
                    "using '{}' (store already exists)",
                    root.display()
                ));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log.debug(&format!("creating store at '{}'", root.display()));
                fs::create_dir_all(root).map_err(|source| StoreError::Io {
                    op: "create store root",
                    path: root.to_path_buf(),
                    source,
                })?;
            }
            Err(source) => {
                return Err(StoreError::Io {
                    op: "stat store root",
                    path: root.to_path_buf(),
                    source,
                });
            }
        }

        let root = root.canonicalize().map_err(|source| StoreError::Io {
            op: "resolve store root",
            path: root.to_path_buf(),
            source,
        })?;

        Ok(Store {
            root,
            locks: LockRegistry::new(),
            log,
        })
    }

    /// The normalized root directory this store lives under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `value` as the record `(collection, resource)`, creating the
    /// collection on first use and fully overwriting any previous document.
    ///
    /// The document lands as pretty-printed JSON with a trailing newline.
    /// It is first written to `<resource>.json.tmp` and then renamed onto
    /// `<resource>.json`; the rename is the crash-safety boundary. A failed
    /// serialization or temp write leaves any existing document untouched.
    pub fn write<T: Serialize>(
        &self,
        collection: &str,
        resource: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        if collection.is_empty() {
            return Err(StoreError::MissingCollection);
        }
        if resource.is_empty() {
            return Err(StoreError::MissingResource);
        }

        let lock = self.locks.collection(collection);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let dir = paths::collection_dir(&self.root, collection);
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            op: "create collection",
            path: dir.clone(),
            source,
        })?;

        let mut document = serde_json::to_vec_pretty(value).map_err(StoreError::Encode)?;
        document.push(b'\n');

        let final_path = paths::record_path(&self.root, collection, resource);
        let temp_path = paths::with_suffix(&final_path, paths::TEMP_SUFFIX);

        self.log
            .debug(&format!("writing '{}'", final_path.display()));

        fs::write(&temp_path, &document).map_err(|source| StoreError::Io {
            op: "write temp record",
            path: temp_path.clone(),
            source,
        })?;

        if let Err(source) = fs::rename(&temp_path, &final_path) {
            // The rename error is the one the caller needs; the orphaned
            // temp file is removed best-effort.
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Io {
                op: "commit record",
                path: final_path,
                source,
            });
        }

        Ok(())
    }

    /// Read the record `(collection, resource)` and decode it into `T`.
    ///
    /// The resource may be given bare or already carrying the `.json`
    /// suffix. Takes no lock: the atomic commit in [`Store::write`]
    /// guarantees a complete document, but a concurrent delete may still
    /// win the race.
    pub fn read<T: DeserializeOwned>(
        &self,
        collection: &str,
        resource: &str,
    ) -> Result<T, StoreError> {
        if collection.is_empty() {
            return Err(StoreError::MissingCollection);
        }
        if resource.is_empty() {
            return Err(StoreError::MissingResource);
        }

        let target = paths::collection_dir(&self.root, collection).join(resource);
        let (path, _) = locate(&target)?;

        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            op: "read record",
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(StoreError::Decode)
    }

    /// The raw JSON documents of every record in `collection`, in
    /// filesystem order.
    ///
    /// Decoding is left to the caller, one document at a time. Takes no
    /// lock: a concurrent write or delete may add or remove entries
    /// mid-scan. The first unreadable entry aborts the scan and discards
    /// partial results.
    pub fn read_all(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        if collection.is_empty() {
            return Err(StoreError::MissingCollection);
        }

        let dir = paths::collection_dir(&self.root, collection);
        let entries = fs::read_dir(&dir).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound { path: dir.clone() }
            } else {
                StoreError::Io {
                    op: "list collection",
                    path: dir.clone(),
                    source,
                }
            }
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                op: "list collection",
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                op: "read record",
                path: path.clone(),
                source,
            })?;
            documents.push(contents);
        }

        Ok(documents)
    }

    /// Delete the record `(collection, resource)`, or the whole collection
    /// directory and everything in it when `resource` is empty.
    ///
    /// Deleting something that does not exist is an error, not a no-op.
    pub fn delete(&self, collection: &str, resource: &str) -> Result<(), StoreError> {
        if collection.is_empty() {
            return Err(StoreError::MissingCollection);
        }

        let lock = self.locks.collection(collection);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let target = if resource.is_empty() {
            paths::collection_dir(&self.root, collection)
        } else {
            paths::collection_dir(&self.root, collection).join(resource)
        };

        let (path, meta) = locate(&target)?;
        self.log.debug(&format!("deleting '{}'", path.display()));

        if meta.is_dir() {
            fs::remove_dir_all(&path).map_err(|source| StoreError::Io {
                op: "remove collection",
                path: path.clone(),
                source,
            })
        } else {
            fs::remove_file(&path).map_err(|source| StoreError::Io {
                op: "remove record",
                path: path.clone(),
                source,
            })
        }
    }
}

/// Tolerant lookup with store-level errors: not-found names the attempted
/// path, anything else is a filesystem error.
fn locate(target: &Path) -> Result<(PathBuf, fs::Metadata), StoreError> {
    paths::locate_existing(target).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: target.to_path_buf(),
            }
        } else {
            StoreError::Io {
                op: "stat target",
                path: target.to_path_buf(),
                source,
            }
        }
    })
}
