use std::sync::Arc;

use tracing::{error, info, warn};

use pra_codec::{
    CodeStoreRequest, EnvelopeCodec, JsonObject, SummaryEnvelope, SummaryStoreRequest,
    TestCaseEnvelope, JSON_CONTENT_TYPE,
};
use pra_store::{BlobStore, PutOptions};
use pra_types::{code_key, code_prefix, namespace_prefix, summary_key, PrId, StorageKey};

use crate::error::{ServiceError, ServiceResult};

const EMPTY_PR_ID: &str = "PR ID cannot be empty";
const CODE_FIELDS_REQUIRED: &str = "File name and test cases are required";
const SUMMARY_FIELDS_REQUIRED: &str = "Github URL and summary data are required";

/// Stateless coordinator for PR artifact reads and writes.
///
/// Cloning shares the backend handle.
#[derive(Clone)]
pub struct StorageService {
    store: Arc<dyn BlobStore>,
}

impl StorageService {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// The shared backend handle.
    pub fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    // ---- Writes ----

    /// Store one test-case file under `{prId}/TestCases/`.
    ///
    /// `test_cases` may be empty but not absent. A second store with the
    /// same PR-ID and sanitized file name overwrites the first.
    pub async fn store_code(
        &self,
        pr_id: &str,
        file_name: &str,
        test_cases: Option<&str>,
    ) -> ServiceResult<StorageKey> {
        let envelope = test_cases.map(|tc| TestCaseEnvelope::new(file_name, tc));
        self.put_code(pr_id, envelope).await
    }

    /// Store the file carried by an HTTP request body. A non-blank body
    /// `prId` wins over `path_pr_id`.
    pub async fn store_code_request(
        &self,
        request: &CodeStoreRequest,
        path_pr_id: Option<&str>,
    ) -> ServiceResult<StorageKey> {
        let pr_id = request.resolve_pr_id(path_pr_id);
        self.put_code(&pr_id, request.to_envelope()).await
    }

    async fn put_code(
        &self,
        pr_id: &str,
        envelope: Option<TestCaseEnvelope>,
    ) -> ServiceResult<StorageKey> {
        let pr = parse_pr_id(pr_id)?;
        let envelope = match envelope {
            Some(env) if !env.file_name.trim().is_empty() => env,
            _ => {
                warn!(pr_id, "rejected code store request: missing file name or test cases");
                return Err(ServiceError::InvalidArgument(CODE_FIELDS_REQUIRED.into()));
            }
        };

        let key = code_key(&pr, &envelope.file_name)?;
        let body = EnvelopeCodec::encode_test_case(&envelope).map_err(|e| {
            ServiceError::Malformed {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })?;

        let options = PutOptions::for_body(JSON_CONTENT_TYPE, &body);
        self.store
            .put(key.as_str(), body, options)
            .await
            .map_err(ServiceError::backend("store code data"))
            .inspect_err(|e| error!(pr_id, key = %key, error = %e, "code store failed"))?;

        info!(pr_id, file_name = %envelope.file_name, key = %key, "stored code data");
        Ok(key)
    }

    /// Store the PR summary, unconditionally replacing any previous one.
    pub async fn store_summary(
        &self,
        pr_id: &str,
        github_url: &str,
        data: Option<&JsonObject>,
    ) -> ServiceResult<StorageKey> {
        let envelope = data.map(|data| SummaryEnvelope::new(github_url, data.clone()));
        self.put_summary(pr_id, envelope).await
    }

    /// Store the summary carried by an HTTP request body under `pr_id`.
    /// The body's own `prId` is not consulted.
    pub async fn store_summary_request(
        &self,
        pr_id: &str,
        request: &SummaryStoreRequest,
    ) -> ServiceResult<StorageKey> {
        self.put_summary(pr_id, request.to_envelope()).await
    }

    async fn put_summary(
        &self,
        pr_id: &str,
        envelope: Option<SummaryEnvelope>,
    ) -> ServiceResult<StorageKey> {
        let pr = parse_pr_id(pr_id)?;
        let envelope = match envelope {
            Some(env) if !env.github_url.trim().is_empty() => env,
            _ => {
                warn!(pr_id, "rejected summary store request: missing github url or data");
                return Err(ServiceError::InvalidArgument(SUMMARY_FIELDS_REQUIRED.into()));
            }
        };

        let key = summary_key(&pr);
        let body = EnvelopeCodec::encode_summary(&envelope).map_err(|e| {
            ServiceError::Malformed {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })?;

        let options = PutOptions::for_body(JSON_CONTENT_TYPE, &body);
        self.store
            .put(key.as_str(), body, options)
            .await
            .map_err(ServiceError::backend("store summary data"))
            .inspect_err(|e| error!(pr_id, key = %key, error = %e, "summary store failed"))?;

        info!(pr_id, key = %key, "stored summary data");
        Ok(key)
    }

    // ---- Reads ----

    /// Read the summary stored for `pr_id`.
    pub async fn get_summary(&self, pr_id: &str) -> ServiceResult<SummaryEnvelope> {
        let pr = parse_pr_id(pr_id)?;
        let key = summary_key(&pr);

        let blob = self
            .store
            .get(key.as_str())
            .await
            .map_err(ServiceError::backend("retrieve summary data"))
            .inspect_err(|e| error!(pr_id, error = %e, "summary read failed"))?
            .ok_or_else(|| {
                warn!(pr_id, "summary data not found");
                ServiceError::NotFound(format!("Summary data not found for PR ID: {pr_id}"))
            })?;

        EnvelopeCodec::decode_summary(&blob.body).map_err(|e| {
            error!(pr_id, key = %key, error = %e, "stored summary is malformed");
            ServiceError::Malformed {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Read one test-case envelope by its full backend key.
    pub async fn get_code(&self, key: &str) -> ServiceResult<TestCaseEnvelope> {
        if key.trim().is_empty() {
            return Err(ServiceError::InvalidArgument("Key cannot be empty".into()));
        }
        let blob = self
            .store
            .get(key)
            .await
            .map_err(ServiceError::backend("retrieve code data"))
            .inspect_err(|e| error!(key, error = %e, "code read failed"))?
            .ok_or_else(|| ServiceError::NotFound(format!("No object found at key: {key}")))?;

        EnvelopeCodec::decode_test_case(&blob.body).map_err(|e| ServiceError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Every test-case envelope stored for `pr_id`, in backend key order.
    ///
    /// Directory markers and non-JSON keys under the prefix are skipped. A
    /// single undecodable object fails the whole listing with
    /// [`ServiceError::Malformed`] naming that key.
    pub async fn list_code_files(&self, pr_id: &str) -> ServiceResult<Vec<TestCaseEnvelope>> {
        let pr = parse_pr_id(pr_id)?;
        let prefix = code_prefix(&pr);

        let listed = self
            .store
            .list(&prefix)
            .await
            .map_err(ServiceError::backend("retrieve code files"))
            .inspect_err(|e| error!(pr_id, error = %e, "code listing failed"))?;

        if listed.is_empty() {
            warn!(pr_id, "no files found");
            return Err(ServiceError::NotFound(format!("No files found for PR: {pr_id}")));
        }

        let mut files = Vec::with_capacity(listed.len());
        for object in listed {
            let key = StorageKey::from_raw(object.key);
            if key.is_directory_marker() || !key.is_json() {
                continue;
            }

            let Some(blob) = self
                .store
                .get(key.as_str())
                .await
                .map_err(ServiceError::backend("retrieve code files"))
                .inspect_err(|e| error!(pr_id, key = %key, error = %e, "code read failed"))?
            else {
                // Listed but gone by the time we read it.
                warn!(pr_id, key = %key, "listed object disappeared");
                continue;
            };

            let envelope = EnvelopeCodec::decode_test_case(&blob.body).map_err(|e| {
                error!(pr_id, key = %key, error = %e, "stored test case is malformed");
                ServiceError::Malformed {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
            })?;
            files.push(envelope);
        }

        info!(pr_id, count = files.len(), "retrieved code files");
        Ok(files)
    }

    /// Whether anything is stored under the `{prId}/` namespace.
    ///
    /// Checks for an object at the literal prefix key first, then for any
    /// object under the prefix.
    pub async fn namespace_exists(&self, pr_id: &str) -> ServiceResult<bool> {
        let pr = parse_pr_id(pr_id)?;
        let prefix = namespace_prefix(&pr);

        let marker = self
            .store
            .exists(&prefix)
            .await
            .map_err(ServiceError::backend("check namespace"))
            .inspect_err(|e| error!(pr_id, error = %e, "namespace check failed"))?;
        if marker {
            return Ok(true);
        }

        let listed = self
            .store
            .list(&prefix)
            .await
            .map_err(ServiceError::backend("check namespace"))
            .inspect_err(|e| error!(pr_id, error = %e, "namespace listing failed"))?;
        Ok(!listed.is_empty())
    }

    /// Whether the object at `key` decodes to exactly `expected`.
    ///
    /// Never fails: missing, unreadable and mismatching objects all yield
    /// `false`.
    pub async fn verify_code(&self, key: &str, expected: &TestCaseEnvelope) -> bool {
        match self.get_code(key).await {
            Ok(stored) => stored == *expected,
            Err(e) => {
                warn!(key, error = %e, "verification failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageService")
            .field("backend", &self.store.name())
            .finish()
    }
}

fn parse_pr_id(pr_id: &str) -> ServiceResult<PrId> {
    PrId::new(pr_id).map_err(|_| {
        warn!("rejected request with empty PR ID");
        ServiceError::InvalidArgument(EMPTY_PR_ID.into())
    })
}
