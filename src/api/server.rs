//! REST surface over the report facade
//!
//! Routes:
//! - `GET  /health`
//! - `GET  /reports`
//! - `POST /reports`                                  (audit intake payload)
//! - `GET  /reports/:id`                              (live state + summary)
//! - `PATCH /reports/:id/criteria/:criterion`         (human edit)
//! - `POST /reports/:id/criteria/:criterion/verification`
//! - `GET  /reports/:id/versions`                     (history, newest first)
//! - `POST /reports/:id/versions`                     (save a version)
//! - `GET  /reports/:id/versions/:n`                  (full snapshot)
//! - `GET  /reports/:id/versions/:a/diff/:b`
//! - `POST /reports/:id/versions/:n/restore`
//!
//! Handlers are thin: deserialize, call the facade, map the typed error to a
//! status code. All business rules live in the service layer.

use crate::errors::AcrError;
use crate::models::{CriterionPatch, VerificationStatus, VersionStatus};
use crate::services::{build_report, CreateReportInput, ReportService, SubmitVerificationInput};
use crate::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReportService>,
    /// Identity recorded for writes that do not carry one
    pub default_identity: String,
}

impl AppState {
    pub fn new(service: ReportService, default_identity: impl Into<String>) -> Self {
        Self {
            service: Arc::new(service),
            default_identity: default_identity.into(),
        }
    }
}

/// Typed error → HTTP status mapping
struct ApiError(AcrError);

impl From<AcrError> for ApiError {
    fn from(e: AcrError) -> Self {
        ApiError(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            AcrError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            AcrError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AcrError::EmptyReport(_) => (StatusCode::UNPROCESSABLE_ENTITY, "empty_report"),
            AcrError::Concurrency(_) => (StatusCode::CONFLICT, "concurrency"),
            AcrError::Io(_) | AcrError::Parse(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };
        let body = ErrorBody {
            kind,
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the router (exposed separately for tests)
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/reports", get(list_reports).post(create_report))
        .route("/reports/:id", get(get_report))
        .route("/reports/:id/criteria/:criterion", patch(update_criterion))
        .route(
            "/reports/:id/criteria/:criterion/verification",
            post(submit_verification),
        )
        .route("/reports/:id/versions", get(list_versions).post(save_version))
        .route("/reports/:id/versions/:n", get(get_version))
        .route("/reports/:id/versions/:a/diff/:b", get(diff_versions))
        .route("/reports/:id/versions/:n/restore", post(restore_version))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the API server on localhost
pub async fn start_server(port: u16, state: AppState) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!("✓ Server listening on http://{}", addr);
    println!("  Reports: http://{}/reports", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// =============================================================================
// Report handlers
// =============================================================================

async fn list_reports(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.service.list_reports()?))
}

#[derive(Deserialize)]
struct CreateReportRequest {
    #[serde(flatten)]
    input: CreateReportInput,
    created_by: Option<String>,
}

async fn create_report(
    State(state): State<AppState>,
    Json(request): Json<CreateReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created_by = request
        .created_by
        .unwrap_or_else(|| state.default_identity.clone());
    let report = build_report(request.input, &created_by, state.service.resolver())?;
    state.service.store().create_report(&report)?;
    Ok((StatusCode::CREATED, Json(report)))
}

async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.get_current_state(&id)?))
}

async fn update_criterion(
    State(state): State<AppState>,
    Path((id, criterion)): Path<(String, String)>,
    Json(patch): Json<CriterionPatch>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.update_criterion(&id, &criterion, patch)?))
}

// =============================================================================
// Verification handlers
// =============================================================================

#[derive(Deserialize)]
struct VerificationRequest {
    status: VerificationStatus,
    method: String,
    #[serde(default)]
    notes: String,
    verified_by: Option<String>,
}

async fn submit_verification(
    State(state): State<AppState>,
    Path((id, criterion)): Path<(String, String)>,
    Json(request): Json<VerificationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = SubmitVerificationInput {
        criterion_id: criterion,
        status: request.status,
        method: request.method,
        notes: request.notes,
        verified_by: request
            .verified_by
            .unwrap_or_else(|| state.default_identity.clone()),
    };
    let entry = state.service.submit_verification(&id, input)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

// =============================================================================
// Version handlers
// =============================================================================

#[derive(Deserialize)]
struct SaveVersionRequest {
    #[serde(default)]
    status: Option<VersionStatus>,
    #[serde(default)]
    reason: Option<String>,
    created_by: Option<String>,
}

async fn list_versions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.get_version_history(&id)?))
}

async fn save_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SaveVersionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created_by = request
        .created_by
        .unwrap_or_else(|| state.default_identity.clone());
    let version = state.service.save_version(
        &id,
        request.status.unwrap_or(VersionStatus::InProgress),
        request.reason,
        &created_by,
    )?;
    Ok((StatusCode::CREATED, Json(version)))
}

async fn get_version(
    State(state): State<AppState>,
    Path((id, n)): Path<(String, u32)>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.get_version_detail(&id, n)?))
}

async fn diff_versions(
    State(state): State<AppState>,
    Path((id, a, b)): Path<(String, u32, u32)>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.compare_versions(&id, a, b)?))
}

#[derive(Deserialize)]
struct RestoreRequest {
    created_by: Option<String>,
}

async fn restore_version(
    State(state): State<AppState>,
    Path((id, n)): Path<(String, u32)>,
    Json(request): Json<RestoreRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created_by = request
        .created_by
        .unwrap_or_else(|| state.default_identity.clone());
    let version = state.service.restore_version(&id, n, &created_by)?;
    Ok((StatusCode::CREATED, Json(version)))
}
