//! Foundation types for PR artifact storage.
//!
//! A pull-request identifier owns a flat slice of the backend keyspace. This
//! crate holds the naming discipline that turns that flat keyspace into a
//! per-PR namespace:
//!
//! ```text
//! {prId}/TestCases/{sanitized fileName}.json
//! {prId}/Summary/summary.json
//! ```
//!
//! # Key Types
//!
//! - [`PrId`]: caller-supplied PR identifier, the top-level key segment
//! - [`ArtifactKind`]: which artifact family a key belongs to
//! - [`StorageKey`]: a derived backend key
//!
//! Key derivation lives in [`keys`]; file-name sanitization in [`names`].

pub mod error;
pub mod keys;
pub mod names;
pub mod pr;

pub use error::{TypeError, TypeResult};
pub use keys::{code_key, code_prefix, namespace_prefix, summary_key, ArtifactKind, StorageKey};
pub use names::sanitize_file_name;
pub use pr::PrId;
