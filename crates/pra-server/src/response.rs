//! Response envelopes.
//!
//! Every endpoint answers with the same outer shape:
//!
//! ```json
//! { "status": "success" | "error", "message": "...", "data": <any or null> }
//! ```

use serde::{Deserialize, Serialize};

use pra_codec::{SummaryEnvelope, TestCaseEnvelope};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Uniform response envelope. `data` serializes as `null` when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.into(),
            message: message.into(),
            data: None,
        }
    }
}

/// `data` of the code store endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCodeData {
    pub pr_id: String,
    pub file_name: String,
    pub s3_key: String,
}

/// `data` of the summary store endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSummaryData {
    pub pr_id: String,
    pub s3_key: String,
}

/// One listed file. `id` carries the original file name; `content` mirrors
/// `testCases` for older clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFileResponse {
    pub id: String,
    pub content: Option<String>,
    pub test_cases: String,
}

impl From<TestCaseEnvelope> for CodeFileResponse {
    fn from(envelope: TestCaseEnvelope) -> Self {
        Self {
            id: envelope.file_name,
            content: Some(envelope.test_cases.clone()),
            test_cases: envelope.test_cases,
        }
    }
}

/// `data` of the listing endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFilesData {
    pub pr_id: String,
    pub files: Vec<CodeFileResponse>,
    pub count: usize,
}

impl CodeFilesData {
    pub fn new(pr_id: impl Into<String>, files: Vec<TestCaseEnvelope>) -> Self {
        let files: Vec<CodeFileResponse> = files.into_iter().map(Into::into).collect();
        Self {
            pr_id: pr_id.into(),
            count: files.len(),
            files,
        }
    }
}

/// `data` of the summary retrieval endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryData {
    pub pr_id: String,
    pub summary_data: SummaryEnvelope,
}

/// `data` of the health probe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthData {
    pub service: String,
    pub version: String,
}

impl Default for HealthData {
    fn default() -> Self {
        Self {
            service: "pra-server".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}
