//! Filesystem-backed blob store.
//!
//! Each key maps to one file under `<root>/<bucket>/`, with `/` in the key
//! becoming a directory separator:
//!
//! ```text
//! PR-1/TestCases/Foo.java.json  ->  <root>/<bucket>/PR-1/TestCases/Foo.java.json
//! ```
//!
//! Writes land in a temp file beside the target and are renamed into place,
//! so a reader never sees a half-written object. No sidecar metadata is
//! written; content types are not recorded.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};
use crate::traits::{BlobStore, ObjectInfo, PutOptions, StoredBlob};

/// Name prefix of in-flight temp files; never surfaced as keys.
const TEMP_PREFIX: &str = ".pra-tmp";

/// Blob store rooted at a local directory.
#[derive(Clone, Debug)]
pub struct FsBlobStore {
    bucket: String,
    base: PathBuf,
}

impl FsBlobStore {
    /// Open (or create) the bucket directory `<root>/<bucket>`.
    pub fn open(root: impl AsRef<Path>, bucket: impl Into<String>) -> StoreResult<Self> {
        let bucket = bucket.into();
        validate_segment(&bucket, &bucket)?;
        let base = root.as_ref().join(&bucket);
        std::fs::create_dir_all(&base)?;
        debug!(path = %base.display(), "opened filesystem bucket");
        Ok(Self { bucket, base })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Directory holding the bucket's objects.
    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// Map an object key onto a file path.
    fn object_path(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() {
            return Err(invalid(key, "key must not be empty"));
        }
        if key.ends_with('/') {
            return Err(invalid(key, "key must not end with '/'"));
        }
        let mut path = self.base.clone();
        for segment in key.split('/') {
            validate_segment(key, segment)?;
            path.push(segment);
        }
        Ok(path)
    }

    /// Deepest directory that can hold keys starting with `prefix`.
    fn listing_root(&self, prefix: &str) -> StoreResult<PathBuf> {
        let mut path = self.base.clone();
        if let Some((dir, _)) = prefix.rsplit_once('/') {
            for segment in dir.split('/') {
                validate_segment(prefix, segment)?;
                path.push(segment);
            }
        }
        Ok(path)
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidKey {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_segment(key: &str, segment: &str) -> StoreResult<()> {
    if segment.is_empty() {
        return Err(invalid(key, "empty path segment"));
    }
    if segment == "." || segment == ".." {
        return Err(invalid(key, format!("relative segment {segment:?}")));
    }
    if segment.contains(['/', '\\', '\0']) {
        return Err(invalid(key, "segment contains a separator or NUL"));
    }
    if segment.starts_with(TEMP_PREFIX) {
        return Err(invalid(key, "reserved segment name"));
    }
    Ok(())
}

/// Rebuild a key from a path relative to the bucket directory.
fn key_for(relative: &Path) -> Option<String> {
    let mut segments = Vec::new();
    for component in relative.components() {
        segments.push(component.as_os_str().to_str()?);
    }
    Some(segments.join("/"))
}

fn write_atomic(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "object path has no parent")
    })?;
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::Builder::new().prefix(TEMP_PREFIX).tempfile_in(dir)?;
    tmp.write_all(body)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn read_optional(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        // A directory, or a path running through an existing file, holds no object.
        Err(_) if !path.is_file() => Ok(None),
        Err(e) => Err(e),
    }
}

fn walk_error(e: walkdir::Error) -> StoreError {
    StoreError::Io(
        e.into_io_error()
            .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
    )
}

fn walk(base: &Path, root: &Path, prefix: &str) -> StoreResult<Vec<ObjectInfo>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut objects = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(walk_error)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry
            .file_name()
            .to_str()
            .map_or(true, |name| name.starts_with(TEMP_PREFIX))
        {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(base) else {
            continue;
        };
        let Some(key) = key_for(relative) else {
            continue;
        };
        if key.starts_with(prefix) {
            let size = entry.metadata().map_err(walk_error)?.len();
            objects.push(ObjectInfo { key, size });
        }
    }
    objects.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(objects)
}

async fn blocking<T, F>(f: F) -> StoreResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> StoreResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Unavailable(format!("blocking task failed: {e}")))?
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, body: Bytes, options: PutOptions) -> StoreResult<()> {
        options.check_length(key, &body)?;
        let path = self.object_path(key)?;
        blocking(move || write_atomic(&path, &body).map_err(StoreError::from)).await?;
        debug!(key, bucket = %self.bucket, "filesystem put");
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<StoredBlob>> {
        if key.ends_with('/') {
            return Ok(None);
        }
        let path = self.object_path(key)?;
        let data = blocking(move || read_optional(&path).map_err(StoreError::from)).await?;
        Ok(data.map(|data| StoredBlob {
            body: Bytes::from(data),
            content_type: None,
        }))
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        if key.ends_with('/') {
            return Ok(false);
        }
        let path = self.object_path(key)?;
        blocking(move || Ok(path.is_file())).await
    }

    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectInfo>> {
        let root = self.listing_root(prefix)?;
        let base = self.base.clone();
        let prefix = prefix.to_string();
        blocking(move || walk(&base, &root, &prefix)).await
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = "application/json";

    fn temp_store() -> (tempfile::TempDir, FsBlobStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path(), "artifacts").unwrap();
        (dir, store)
    }

    async fn put(store: &FsBlobStore, key: &str, body: &'static [u8]) {
        store
            .put(key, Bytes::from_static(body), PutOptions::for_body(JSON, body))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn put_creates_nested_file() {
        let (_dir, store) = temp_store();
        put(&store, "PR-1/TestCases/Foo.java.json", b"{}").await;
        let path = store.base_dir().join("PR-1").join("TestCases").join("Foo.java.json");
        assert_eq!(std::fs::read(path).unwrap(), b"{}");
    }

    #[tokio::test]
    async fn get_round_trip_and_missing() {
        let (_dir, store) = temp_store();
        put(&store, "PR-1/Summary/summary.json", b"{\"x\":1}").await;
        let blob = store.get("PR-1/Summary/summary.json").await.unwrap().unwrap();
        assert_eq!(&blob.body[..], b"{\"x\":1}");
        assert!(blob.content_type.is_none());
        assert!(store.get("PR-1/Summary/other.json").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_of_directory_is_none() {
        let (_dir, store) = temp_store();
        put(&store, "PR-1/TestCases/a.json", b"1").await;
        assert!(store.get("PR-1/TestCases").await.unwrap().is_none());
        assert!(store.get("PR-1/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_through_existing_file_is_none() {
        let (_dir, store) = temp_store();
        put(&store, "PR-1/TestCases/Foo.java.json", b"{}").await;
        let nested = "PR-1/TestCases/Foo.java.json/Summary/summary.json";
        assert!(store.get(nested).await.unwrap().is_none());
        assert!(!store.exists(nested).await.unwrap());
    }

    #[tokio::test]
    async fn overwrite_replaces_content() {
        let (_dir, store) = temp_store();
        put(&store, "PR-1/TestCases/a.json", b"old").await;
        put(&store, "PR-1/TestCases/a.json", b"newer").await;
        let blob = store.get("PR-1/TestCases/a.json").await.unwrap().unwrap();
        assert_eq!(&blob.body[..], b"newer");
        assert_eq!(store.list("PR-1/").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn exists_only_for_files() {
        let (_dir, store) = temp_store();
        put(&store, "PR-1/TestCases/a.json", b"1").await;
        assert!(store.exists("PR-1/TestCases/a.json").await.unwrap());
        assert!(!store.exists("PR-1/").await.unwrap());
        assert!(!store.exists("PR-1/TestCases").await.unwrap());
        assert!(!store.exists("PR-9/x.json").await.unwrap());
    }

    #[tokio::test]
    async fn list_is_sorted_and_scoped() {
        let (_dir, store) = temp_store();
        put(&store, "PR-2/TestCases/Foo.java.json", b"1").await;
        put(&store, "PR-2/TestCases/Bar.java.json", b"22").await;
        put(&store, "PR-2/Summary/summary.json", b"333").await;
        put(&store, "PR-20/TestCases/Baz.java.json", b"4").await;

        let listed = store.list("PR-2/TestCases/").await.unwrap();
        let keys: Vec<&str> = listed.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec![
            "PR-2/TestCases/Bar.java.json",
            "PR-2/TestCases/Foo.java.json",
        ]);
        assert_eq!(listed[0].size, 2);

        assert_eq!(store.list("PR-2/").await.unwrap().len(), 3);
        // A partial final segment matches sibling namespaces too, as on S3.
        assert_eq!(store.list("PR-2").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn list_missing_prefix_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.list("NOPE/TestCases/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_traversal_and_malformed_keys() {
        let (_dir, store) = temp_store();
        for key in ["", "../escape.json", "PR-1/../../x.json", "PR-1//a.json", "PR-1/./a.json", "PR-1/a\\b.json"] {
            let err = store
                .put(key, Bytes::from_static(b"{}"), PutOptions::for_body(JSON, b"{}"))
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey { .. }), "key {key:?} accepted");
        }
        assert!(store.list("../").await.is_err());
    }

    #[tokio::test]
    async fn reopen_sees_existing_objects() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FsBlobStore::open(dir.path(), "b").unwrap();
            put(&store, "PR-1/TestCases/a.json", b"{}").await;
        }
        let store = FsBlobStore::open(dir.path(), "b").unwrap();
        assert!(store.exists("PR-1/TestCases/a.json").await.unwrap());
        assert_eq!(store.bucket(), "b");
    }

    #[test]
    fn rejects_bad_bucket_name() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FsBlobStore::open(dir.path(), "..").is_err());
        assert!(FsBlobStore::open(dir.path(), "").is_err());
    }
}
