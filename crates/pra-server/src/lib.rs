//! HTTP server for PR artifact storage.
//!
//! Exposes the [`StorageService`](pra_service::StorageService) operations as
//! a JSON REST API under `/api/v1`, with a uniform
//! `{status, message, data}` envelope on every response.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod handler;
pub mod response;
pub mod router;
pub mod server;

pub use config::{BackendKind, ServerConfig};
pub use error::{ApiError, ServerError, ServerResult};
pub use response::{ApiResponse, CodeFileResponse};
pub use router::build_router;
pub use server::PraServer;
