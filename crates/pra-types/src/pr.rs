use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// Pull-request identifier.
///
/// Opaque to the service: the only requirement is that it is non-empty after
/// trimming. The value is kept exactly as given and used verbatim as the
/// first key segment; callers are trusted to pass URL-safe values.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrId(String);

impl PrId {
    /// Parse a PR identifier, rejecting blank input.
    pub fn new(value: impl Into<String>) -> TypeResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TypeError::EmptyPrId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrId({})", self.0)
    }
}

impl fmt::Display for PrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PrId {
    type Error = TypeError;

    fn try_from(value: String) -> TypeResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PrId {
    type Error = TypeError;

    fn try_from(value: &str) -> TypeResult<Self> {
        Self::new(value)
    }
}

impl From<PrId> for String {
    fn from(id: PrId) -> Self {
        id.0
    }
}

impl AsRef<str> for PrId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifier() {
        let id = PrId::new("PR-1").unwrap();
        assert_eq!(id.as_str(), "PR-1");
        assert_eq!(id.to_string(), "PR-1");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(PrId::new(""), Err(TypeError::EmptyPrId));
        assert_eq!(PrId::new("   "), Err(TypeError::EmptyPrId));
        assert_eq!(PrId::new("\t\n"), Err(TypeError::EmptyPrId));
    }

    #[test]
    fn value_is_not_trimmed_or_sanitized() {
        let id = PrId::new(" PR 7 ").unwrap();
        assert_eq!(id.as_str(), " PR 7 ");
    }

    #[test]
    fn serde_is_transparent_and_validating() {
        let id: PrId = serde_json::from_str("\"PR-9\"").unwrap();
        assert_eq!(id.as_str(), "PR-9");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"PR-9\"");
        assert!(serde_json::from_str::<PrId>("\"  \"").is_err());
    }

    #[test]
    fn debug_format() {
        let id = PrId::new("PR-2").unwrap();
        assert_eq!(format!("{id:?}"), "PrId(PR-2)");
    }
}
