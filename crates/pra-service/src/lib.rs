//! Storage service for PR artifacts.
//!
//! [`StorageService`] is the stateless orchestrator between a request and
//! the backend: validate, derive the key, encode, then PUT; or LIST/GET,
//! then decode. It holds exactly one collaborator, a shared
//! [`BlobStore`](pra_store::BlobStore) handle, and no other state.
//!
//! Every failure is a [`ServiceError`] tagged with its kind, so the HTTP
//! layer can map kinds onto status codes without string matching.

pub mod error;
pub mod service;

pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use service::StorageService;
