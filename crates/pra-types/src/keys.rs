//! Deterministic backend key derivation.
//!
//! Layout under a PR namespace:
//!
//! - `{prId}/`: the namespace prefix
//! - `{prId}/TestCases/{sanitized fileName}.json`: one object per file
//! - `{prId}/Summary/summary.json`: exactly one summary per PR
//!
//! Every function here is pure: the same inputs always yield the same key,
//! which is what makes a repeated store an idempotent overwrite.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::names::sanitize_file_name;
use crate::pr::PrId;

/// Suffix of every stored envelope.
pub const JSON_SUFFIX: &str = ".json";

/// Object name of the per-PR summary.
pub const SUMMARY_OBJECT: &str = "summary.json";

/// Artifact family; each owns one directory segment under the PR namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    TestCases,
    Summary,
}

impl ArtifactKind {
    /// The directory segment used in backend keys.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::TestCases => "TestCases",
            Self::Summary => "Summary",
        }
    }

    /// Prefix shared by every artifact of this kind for `pr`.
    pub fn prefix(&self, pr: &PrId) -> String {
        format!("{}/{}/", pr.as_str(), self.segment())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// A backend object key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Wrap an arbitrary key, e.g. one returned by a backend listing.
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Directory markers end in `/` and never hold an envelope.
    pub fn is_directory_marker(&self) -> bool {
        self.0.ends_with('/')
    }

    /// Whether this key names a JSON envelope.
    pub fn is_json(&self) -> bool {
        self.0.ends_with(JSON_SUFFIX)
    }
}

impl fmt::Debug for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageKey({})", self.0)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `{prId}/TestCases/{sanitize(fileName)}.json`.
///
/// The file name must be non-empty after trimming; it is sanitized exactly
/// once, here.
pub fn code_key(pr: &PrId, file_name: &str) -> TypeResult<StorageKey> {
    if file_name.trim().is_empty() {
        return Err(TypeError::EmptyFileName);
    }
    Ok(StorageKey(format!(
        "{}{}{}",
        ArtifactKind::TestCases.prefix(pr),
        sanitize_file_name(file_name),
        JSON_SUFFIX
    )))
}

/// `{prId}/Summary/summary.json`.
pub fn summary_key(pr: &PrId) -> StorageKey {
    StorageKey(format!("{}{}", ArtifactKind::Summary.prefix(pr), SUMMARY_OBJECT))
}

/// `{prId}/TestCases/`.
pub fn code_prefix(pr: &PrId) -> String {
    ArtifactKind::TestCases.prefix(pr)
}

/// `{prId}/`.
pub fn namespace_prefix(pr: &PrId) -> String {
    format!("{}/", pr.as_str())
}
