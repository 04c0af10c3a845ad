use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use common::types::{SaveAck, SaveCsvRequest};
use service::{csv::CsvFile, errors::ServiceError};
use tracing::{debug, error, info, warn};

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

const CSV_CONTENT_TYPE: &str = "text/csv";

/// Log a failed request with its outcome category and turn it into the response error.
fn reject(method: &'static str, filename: &str, err: impl Into<ApiError>) -> ApiError {
    let err = err.into();
    match &err {
        ApiError::Internal(msg) => {
            error!(method, %filename, outcome = err.outcome(), error = %msg, "csv request failed")
        }
        _ => warn!(method, %filename, outcome = err.outcome(), reason = %err, "csv request rejected"),
    }
    err
}

async fn read_csv(state: &ServerState, filename: &str) -> Result<Response, ApiError> {
    let file = CsvFile::for_read(filename).map_err(|e| reject("GET", filename, e))?;
    let doc = state.store.read(file).await.map_err(|e| reject("GET", filename, e))?;
    info!(
        method = "GET",
        %filename,
        outcome = "ok",
        bytes = doc.len(),
        default = doc.is_default,
        "csv served"
    );
    Ok(([(header::CONTENT_TYPE, CSV_CONTENT_TYPE)], doc.bytes).into_response())
}

async fn save_csv_inner(
    state: &ServerState,
    filename: &str,
    body: &[u8],
) -> Result<Json<SaveAck>, ApiError> {
    let file = CsvFile::for_write(filename).map_err(|e| reject("POST", filename, e))?;
    let payload: SaveCsvRequest = serde_json::from_slice(body).map_err(|e| {
        debug!(%filename, error = %e, "request body is not a content object");
        reject("POST", filename, ApiError::BadRequest("invalid json".into()))
    })?;
    state
        .store
        .write(file, &payload.content)
        .await
        .map_err(|e: ServiceError| reject("POST", filename, e))?;
    info!(
        method = "POST",
        %filename,
        outcome = "ok",
        bytes = payload.content.len(),
        "csv written"
    );
    Ok(Json(SaveAck::ok()))
}

/// GET /csv/{filename}
pub async fn get_csv(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    read_csv(&state, &filename).await
}

/// POST /csv/{filename} with `{"content": "..."}`
///
/// The body is decoded as JSON whatever the `Content-Type` header says.
pub async fn save_csv(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
    body: Bytes,
) -> Result<Json<SaveAck>, ApiError> {
    save_csv_inner(&state, &filename, &body).await
}

/// GET /csv/ (no filename)
pub async fn get_csv_unnamed(State(state): State<ServerState>) -> Result<Response, ApiError> {
    read_csv(&state, "").await
}

/// POST /csv/ (no filename)
pub async fn save_csv_unnamed(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<SaveAck>, ApiError> {
    save_csv_inner(&state, "", &body).await
}

/// OPTIONS on any `/csv` path: empty 200 for browser preflights.
pub async fn preflight() -> StatusCode {
    debug!(method = "OPTIONS", "csv preflight");
    StatusCode::OK
}

/// Any other method on a `/csv` path.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    let err = ApiError::MethodNotAllowed;
    warn!(method = %method, path = %uri.path(), outcome = err.outcome(), "csv request rejected");
    err
}
