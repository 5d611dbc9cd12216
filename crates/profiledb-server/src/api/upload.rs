use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Extension, Json,
};
use profiledb_db::PgProfileStore;
use profiledb_ingest::{IngestError, UploadSummary};
use profiledb_sheet::SheetError;

use crate::middleware::RequestId;

use super::{ApiError, AppState, MessageResponse, ResponseMeta};

/// Name of the multipart field that carries the spreadsheet.
const FILE_FIELD: &str = "file";

struct UploadedFile {
    file_name: String,
    bytes: Vec<u8>,
}

pub(super) async fn upload_profiles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse<UploadSummary>>, ApiError> {
    let req_id = req_id.0;

    let Ok(multipart) = multipart else {
        return Err(no_file(req_id));
    };
    let Some(file) = find_file_field(multipart)
        .await
        .map_err(|e| map_multipart_error(req_id.clone(), &e))?
    else {
        return Err(no_file(req_id));
    };

    tracing::info!(
        file_name = %file.file_name,
        bytes = file.bytes.len(),
        "received upload"
    );

    let rows = profiledb_sheet::parse_upload(
        &file.file_name,
        file.bytes,
        state.upload_dir.as_deref(),
    )
    .await
    .map_err(|e| map_sheet_error(req_id.clone(), &e))?;

    let store = PgProfileStore::new(state.pool.clone());
    let summary = profiledb_ingest::run_upload(&store, rows)
        .await
        .map_err(|e| map_ingest_error(req_id.clone(), &e))?;

    Ok(Json(MessageResponse {
        message: summary.message().to_string(),
        data: Some(summary),
        meta: ResponseMeta::new(req_id),
    }))
}

pub(super) async fn method_not_allowed(Extension(req_id): Extension<RequestId>) -> ApiError {
    ApiError::new(
        req_id.0,
        "method_not_allowed",
        "only POST is supported on this endpoint",
    )
}

/// Return the first `file` field that carries a non-blank file name. Other
/// fields are drained and ignored; browsers send `filename=""` when no file
/// was picked.
async fn find_file_field(mut multipart: Multipart) -> Result<Option<UploadedFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if let Some(file) = read_file_field(field).await? {
            return Ok(Some(file));
        }
    }
    Ok(None)
}

async fn read_file_field(field: Field<'_>) -> Result<Option<UploadedFile>, MultipartError> {
    if field.name() != Some(FILE_FIELD) {
        return Ok(None);
    }
    let Some(file_name) = field
        .file_name()
        .filter(|name| !name.trim().is_empty())
        .map(ToOwned::to_owned)
    else {
        return Ok(None);
    };
    let bytes = field.bytes().await?;
    Ok(Some(UploadedFile {
        file_name,
        bytes: bytes.to_vec(),
    }))
}

fn no_file(request_id: String) -> ApiError {
    ApiError::new(
        request_id,
        "no_file",
        "no file uploaded; send the spreadsheet in the multipart field \"file\"",
    )
}

fn map_multipart_error(request_id: String, error: &MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(request_id, "payload_too_large", "upload exceeds the size limit");
    }
    tracing::warn!(error = %error, "malformed multipart body");
    ApiError::new(request_id, "bad_request", error.body_text())
}

fn map_sheet_error(request_id: String, error: &SheetError) -> ApiError {
    if error.is_format_error() {
        tracing::warn!(error = %error, "rejected upload");
        ApiError::new(request_id, "invalid_format", error.to_string())
    } else {
        tracing::error!(error = %error, "failed to process upload");
        ApiError::new(request_id, "internal_error", "failed to process upload")
    }
}

fn map_ingest_error(request_id: String, error: &IngestError) -> ApiError {
    tracing::error!(error = %error, "upload reconciliation failed");
    let code = match error {
        IngestError::StorageConnection(_) => "storage_unavailable",
        IngestError::StorageWrite(_) => "storage_write_failed",
        IngestError::StorageQuery(_) => "internal_error",
    };
    ApiError::new(request_id, code, error.to_string())
}
