//! # docshelf-store
//!
//! An embedded, filesystem-backed JSON document store. Records are grouped
//! into named collections and persisted one pretty-printed JSON file per
//! record, so a store is always inspectable with ordinary shell tools:
//!
//! ```text
//! <root>/<collection>/<resource>.json
//! ```
//!
//! Writes and deletes serialize per collection through in-process locks;
//! operations on different collections proceed in parallel. Each write
//! commits through a temp-file-plus-atomic-rename, so a crash or a
//! concurrent reader never sees a half-written document. There is no query
//! language, no indexing, and no cross-process coordination; the store is
//! for a single process that wants durable, human-readable local state
//! without running a database server.
//!
//! ## Example
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use docshelf_store::{Options, Store};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! fn main() -> Result<(), docshelf_store::StoreError> {
//!     let store = Store::open("./data", Options::default())?;
//!
//!     store.write("users", "alice", &User { name: "Alice".into(), age: 30 })?;
//!     let alice: User = store.read("users", "alice")?;
//!     assert_eq!(alice.age, 30);
//!
//!     for document in store.read_all("users")? {
//!         println!("{}", document);
//!     }
//!
//!     store.delete("users", "alice")?;
//!     Ok(())
//! }
//! ```

mod error;
mod locks;
mod logger;
mod paths;
mod store;

pub use error::StoreError;
pub use logger::{ConsoleLogger, Level, LogFacade, Logger};
pub use store::{Options, Store};
