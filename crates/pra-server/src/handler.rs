use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use pra_codec::{CodeStoreRequest, PrIdRequest, SummaryStoreRequest};
use pra_service::StorageService;

use crate::error::ApiError;
use crate::response::{
    ApiResponse, CodeFilesData, HealthData, StoredCodeData, StoredSummaryData, SummaryData,
};

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn ok<T>(status: StatusCode, message: &str, data: T) -> ApiResult<T> {
    Ok((status, Json(ApiResponse::success(message, data))))
}

// ---- Code ----

/// `POST /store/:pr_id`. A non-blank `prId` in the body wins over the path.
pub async fn store_code_for_pr(
    State(service): State<StorageService>,
    Path(pr_id): Path<String>,
    payload: Result<Json<CodeStoreRequest>, JsonRejection>,
) -> ApiResult<StoredCodeData> {
    let req = body(payload)?;
    store_code_inner(&service, &req, Some(pr_id.as_str())).await
}

/// `POST /store`, PR-ID taken from the body only.
pub async fn store_code(
    State(service): State<StorageService>,
    payload: Result<Json<CodeStoreRequest>, JsonRejection>,
) -> ApiResult<StoredCodeData> {
    let req = body(payload)?;
    store_code_inner(&service, &req, None).await
}

async fn store_code_inner(
    service: &StorageService,
    req: &CodeStoreRequest,
    path_pr_id: Option<&str>,
) -> ApiResult<StoredCodeData> {
    let pr_id = req.resolve_pr_id(path_pr_id);
    tracing::debug!(pr_id = %pr_id, "store code request");
    let key = service.store_code_request(req, path_pr_id).await?;
    let data = StoredCodeData {
        pr_id,
        file_name: req.file_name().unwrap_or_default().to_string(),
        s3_key: key.into_string(),
    };
    ok(StatusCode::CREATED, "Code data stored successfully", data)
}

pub async fn retrieve_code_for_pr(
    State(service): State<StorageService>,
    Path(pr_id): Path<String>,
) -> ApiResult<CodeFilesData> {
    list_inner(&service, pr_id).await
}

pub async fn retrieve_code(
    State(service): State<StorageService>,
    payload: Result<Json<PrIdRequest>, JsonRejection>,
) -> ApiResult<CodeFilesData> {
    let req = body(payload)?;
    list_inner(&service, req.pr_id.unwrap_or_default()).await
}

async fn list_inner(service: &StorageService, pr_id: String) -> ApiResult<CodeFilesData> {
    let files = service.list_code_files(&pr_id).await?;
    let data = CodeFilesData::new(pr_id, files);
    ok(StatusCode::OK, "Code files retrieved successfully", data)
}

// ---- Summary ----

/// `POST /store/summary/:pr_id`. The path PR-ID is authoritative.
pub async fn store_summary_for_pr(
    State(service): State<StorageService>,
    Path(pr_id): Path<String>,
    payload: Result<Json<SummaryStoreRequest>, JsonRejection>,
) -> ApiResult<StoredSummaryData> {
    let req = body(payload)?;
    store_summary_inner(&service, StatusCode::CREATED, pr_id, req).await
}

/// `POST /summary/store`, PR-ID taken from the body.
pub async fn store_summary(
    State(service): State<StorageService>,
    payload: Result<Json<SummaryStoreRequest>, JsonRejection>,
) -> ApiResult<StoredSummaryData> {
    let mut req = body(payload)?;
    let pr_id = req.pr_id.take().unwrap_or_default();
    store_summary_inner(&service, StatusCode::OK, pr_id, req).await
}

async fn store_summary_inner(
    service: &StorageService,
    status: StatusCode,
    pr_id: String,
    req: SummaryStoreRequest,
) -> ApiResult<StoredSummaryData> {
    tracing::debug!(pr_id = %pr_id, "store summary request");
    let key = service.store_summary_request(&pr_id, &req).await?;
    let data = StoredSummaryData {
        pr_id,
        s3_key: key.into_string(),
    };
    ok(status, "Summary data stored successfully", data)
}

pub async fn retrieve_summary_for_pr(
    State(service): State<StorageService>,
    Path(pr_id): Path<String>,
) -> ApiResult<SummaryData> {
    summary_inner(&service, pr_id).await
}

pub async fn retrieve_summary(
    State(service): State<StorageService>,
    payload: Result<Json<PrIdRequest>, JsonRejection>,
) -> ApiResult<SummaryData> {
    let req = body(payload)?;
    summary_inner(&service, req.pr_id.unwrap_or_default()).await
}

async fn summary_inner(service: &StorageService, pr_id: String) -> ApiResult<SummaryData> {
    let summary = service.get_summary(&pr_id).await?;
    let data = SummaryData {
        pr_id,
        summary_data: summary,
    };
    ok(StatusCode::OK, "Summary data retrieved successfully", data)
}

/// Health probe.
pub async fn health() -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse::success(
        "PR artifact storage API is running",
        HealthData::default(),
    ))
}
