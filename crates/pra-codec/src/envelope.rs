use serde::{Deserialize, Serialize};

use crate::JsonObject;

/// Stored form of one test-case file.
///
/// ```json
/// { "fileName": "Foo.java", "testCases": "class Foo {}" }
/// ```
///
/// `file_name` is the caller's original name, before sanitization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseEnvelope {
    pub file_name: String,
    pub test_cases: String,
}

impl TestCaseEnvelope {
    pub fn new(file_name: impl Into<String>, test_cases: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            test_cases: test_cases.into(),
        }
    }
}

/// Stored form of a PR summary.
///
/// ```json
/// { "githubUrl": "https://...", "data": { "risk": "low" } }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEnvelope {
    pub github_url: String,
    pub data: JsonObject,
}

impl SummaryEnvelope {
    pub fn new(github_url: impl Into<String>, data: JsonObject) -> Self {
        Self {
            github_url: github_url.into(),
            data,
        }
    }
}
