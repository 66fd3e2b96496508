//! HTTP request shapes.
//!
//! Every field is optional at the serde level so that a missing field is
//! reported by validation with a precise message rather than as a generic
//! body rejection.

use serde::{Deserialize, Serialize};

use crate::envelope::{SummaryEnvelope, TestCaseEnvelope};
use crate::JsonObject;

/// Body of the code store endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStoreRequest {
    #[serde(default)]
    pub pr_id: Option<String>,
    #[serde(default)]
    pub content: Option<CodeContent>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeContent {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub test_cases: Option<String>,
}

impl CodeStoreRequest {
    /// The PR-ID to store under: the body value unless it is absent or
    /// blank, in which case the path value.
    pub fn resolve_pr_id(&self, path_pr_id: Option<&str>) -> String {
        match self.pr_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => path_pr_id.unwrap_or_default().to_string(),
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.content.as_ref()?.file_name.as_deref()
    }

    pub fn test_cases(&self) -> Option<&str> {
        self.content.as_ref()?.test_cases.as_deref()
    }

    /// Project onto the stored shape, if both payload fields are present.
    pub fn to_envelope(&self) -> Option<TestCaseEnvelope> {
        Some(TestCaseEnvelope::new(self.file_name()?, self.test_cases()?))
    }
}

/// Body of the summary store endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStoreRequest {
    #[serde(default)]
    pub pr_id: Option<String>,
    #[serde(default)]
    pub content: Option<SummaryContent>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryContent {
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub data: Option<JsonObject>,
}

impl SummaryStoreRequest {
    pub fn github_url(&self) -> Option<&str> {
        self.content.as_ref()?.github_url.as_deref()
    }

    pub fn data(&self) -> Option<&JsonObject> {
        self.content.as_ref()?.data.as_ref()
    }

    pub fn to_envelope(&self) -> Option<SummaryEnvelope> {
        Some(SummaryEnvelope::new(self.github_url()?, self.data()?.clone()))
    }
}

/// `{ "prId": "..." }` body of the POST retrieval endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrIdRequest {
    #[serde(default)]
    pub pr_id: Option<String>,
}
