//! REST endpoint handlers.
//!
//! Handlers are thin: they extract the request, call the record store or the
//! summary formatter, and translate [`rollcall::Error`] into an HTTP
//! response through [`ApiError`]. Extractors are taken as `Result` so that
//! undecodable bodies and ids get the same `{"detail": ...}` shape.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rollcall::prelude::*;
use serde::Serialize;
use tracing::warn;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub summaries: SummaryFormatter,
}

// ── Errors ─────────────────────────────────────────────────────────

/// A failed request on its way out as an HTTP response.
///
/// Either a core error, or a request axum could not decode (bad JSON body,
/// non-numeric id). Both render as `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    Core(Error),
    Request { status: StatusCode, detail: String },
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Core(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // A wrong content type keeps its 415; anything wrong with the body
        // itself is an unprocessable entity.
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => rejection.status(),
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self::Request {
            status,
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Request {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: rejection.body_text(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(Error::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Core(Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Core(Error::GenerationUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Core(Error::GenerationFailed { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Request { status, .. } => *status,
        }
    }

    /// Client-facing message. Generator internals stay in the logs.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Core(Error::Validation(msg)) => msg.clone(),
            ApiError::Core(Error::NotFound(_)) => "Student not found".to_string(),
            ApiError::Core(Error::GenerationUnavailable(_)) => {
                "Could not connect to the text generation service".to_string()
            }
            ApiError::Core(Error::GenerationFailed { .. }) => {
                "Error generating summary".to_string()
            }
            ApiError::Request { detail, .. } => detail.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Core(err) = &self
            && err.is_generation()
        {
            warn!("summary request failed: {err}");
        }
        let status = self.status_code();
        let body = Json(ErrorBody {
            detail: self.detail(),
        });
        (status, body).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ── Records ────────────────────────────────────────────────────────

/// POST /students — Create a record. All three fields are required.
pub async fn create_student(
    State(app): State<AppState>,
    body: Result<Json<NewRecord>, JsonRejection>,
) -> ApiResult<Record> {
    let Json(body) = body?;
    Ok(Json(app.store.create(body)?))
}

/// GET /students — All live records in id order.
pub async fn list_students(State(app): State<AppState>) -> Json<Vec<Record>> {
    Json(app.store.list())
}

/// GET /students/{id}
pub async fn get_student(
    State(app): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Record> {
    let Path(id) = id?;
    Ok(Json(app.store.get(id)?))
}

/// PUT /students/{id} — Partial update.
///
/// Keys missing from the body (or set to `null`) are left unchanged. Any
/// key that is present is validated, so `{"name": ""}` is rejected rather
/// than ignored. An empty object returns the record as-is.
pub async fn update_student(
    State(app): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    patch: Result<Json<RecordPatch>, JsonRejection>,
) -> ApiResult<Record> {
    let Path(id) = id?;
    let Json(patch) = patch?;
    Ok(Json(app.store.update(id, &patch)?))
}

/// Response body for DELETE /students/{id}.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// DELETE /students/{id} — 200 with a confirmation, 404 if absent.
pub async fn delete_student(
    State(app): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<DeleteResponse> {
    let Path(id) = id?;
    if !app.store.delete(id) {
        return Err(Error::NotFound(id).into());
    }
    Ok(Json(DeleteResponse {
        message: "Student deleted successfully".to_string(),
    }))
}

// ── Summaries ──────────────────────────────────────────────────────

/// GET /students/{id}/summary — Generated plain-text description.
///
/// Reads a snapshot first, so the store lock is never held while the
/// generator runs.
pub async fn get_summary(
    State(app): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Summary> {
    let Path(id) = id?;
    let record = app.store.get(id)?;
    Ok(Json(app.summaries.format(&record).await?))
}

// ── Health ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub records: usize,
}

/// GET /health — Liveness plus the live record count.
pub async fn health(State(app): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        records: app.store.len(),
    })
}
