//! JSON envelopes for PR artifact storage.
//!
//! Two families of shapes live here:
//!
//! - **Stored envelopes** ([`TestCaseEnvelope`], [`SummaryEnvelope`]) are
//!   exactly what is persisted at a backend key. They never carry the PR-ID;
//!   that lives in the key.
//! - **Request envelopes** ([`CodeStoreRequest`], [`SummaryStoreRequest`],
//!   [`PrIdRequest`]) are the HTTP input shapes, which wrap the payload under
//!   `content` and carry an optional `prId`.
//!
//! [`EnvelopeCodec`] turns stored envelopes into bytes and back. Decoding is
//! permissive about unknown fields and strict about missing ones.

pub mod codec;
pub mod envelope;
pub mod error;
pub mod request;

pub use codec::{EnvelopeCodec, JSON_CONTENT_TYPE};
pub use envelope::{SummaryEnvelope, TestCaseEnvelope};
pub use error::{CodecError, CodecResult};
pub use request::{CodeContent, CodeStoreRequest, PrIdRequest, SummaryContent, SummaryStoreRequest};

/// Free-form JSON object carried by summaries.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
