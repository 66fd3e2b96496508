use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{StoreError, StoreResult};

/// Metadata sent with a PUT.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PutOptions {
    /// MIME type recorded with the object, if the backend keeps one.
    pub content_type: String,
    /// Exact byte length of the body.
    pub content_length: u64,
}

impl PutOptions {
    /// Options for `body` with its exact length.
    pub fn for_body(content_type: impl Into<String>, body: &[u8]) -> Self {
        Self {
            content_type: content_type.into(),
            content_length: body.len() as u64,
        }
    }

    /// Reject a body whose length differs from the declared one.
    pub fn check_length(&self, key: &str, body: &[u8]) -> StoreResult<()> {
        let actual = body.len() as u64;
        if actual != self.content_length {
            return Err(StoreError::LengthMismatch {
                key: key.to_string(),
                declared: self.content_length,
                actual,
            });
        }
        Ok(())
    }
}

/// An object read back from the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredBlob {
    pub body: Bytes,
    /// `None` when the backend does not record content types.
    pub content_type: Option<String>,
}

impl StoredBlob {
    pub fn size(&self) -> u64 {
        self.body.len() as u64
    }
}

/// One entry of a prefix listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: String,
    pub size: u64,
}

/// Flat key-value blob store.
///
/// All implementations must satisfy these invariants:
/// - `put` overwrites unconditionally; the later write wins.
/// - A single `put` is atomic: readers see the old body or the new one.
/// - `get` on a missing key returns `Ok(None)`.
/// - `list` is unpaginated and sorted ascending by key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `body` at `key`, replacing any existing object.
    async fn put(&self, key: &str, body: Bytes, options: PutOptions) -> StoreResult<()>;

    /// Read the object at `key`.
    async fn get(&self, key: &str) -> StoreResult<Option<StoredBlob>>;

    /// Check whether an object exists at exactly `key`.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// List every object whose key starts with `prefix`.
    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectInfo>>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_options_for_body() {
        let opts = PutOptions::for_body("application/json", b"{}");
        assert_eq!(opts.content_length, 2);
        assert_eq!(opts.content_type, "application/json");
        assert!(opts.check_length("k", b"{}").is_ok());
    }

    #[test]
    fn length_mismatch_detected() {
        let opts = PutOptions::for_body("application/json", b"{}");
        let err = opts.check_length("k", b"{ }").unwrap_err();
        assert!(matches!(
            err,
            StoreError::LengthMismatch { declared: 2, actual: 3, .. }
        ));
    }

    #[test]
    fn stored_blob_size() {
        let blob = StoredBlob {
            body: Bytes::from_static(b"abc"),
            content_type: None,
        };
        assert_eq!(blob.size(), 3);
    }
}
