//! Object-store backends for PR artifact storage.
//!
//! The service treats its backend as a flat key-value blob store with four
//! operations: PUT, GET, EXISTS and LIST-PREFIX. Keys are `/`-separated
//! strings; there are no real directories, a "folder" is just a shared key
//! prefix.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`InMemoryBlobStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`FsBlobStore`] -- one file per key under `<root>/<bucket>/`
//!
//! # Backend Contract
//!
//! 1. PUT is last-write-wins and atomic per object.
//! 2. GET of a missing key is `Ok(None)`, never an error.
//! 3. LIST returns every key under the prefix, in ascending byte order.
//! 4. Backends are safe for concurrent use through a shared handle.
//! 5. The store never interprets object contents.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsBlobStore;
pub use memory::InMemoryBlobStore;
pub use traits::{BlobStore, ObjectInfo, PutOptions, StoredBlob};
