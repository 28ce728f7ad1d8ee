// ==============================================================================
// handlers.rs - API Request Handlers
// ==============================================================================
// Description: HTTP handlers for health checks and report projections
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

use variant_report::fetch::{DirectorySource, DocumentSource};
use variant_report::models::{SUMMARY_DOCUMENT, VARIANTS_DOCUMENT};
use variant_report::render::{renderer_for, OutputFormat};
use variant_report::report::ReportLoader;

use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

/// Readiness check endpoint: both report documents must be present
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let dir = state.report_dir();
    let report_dir = dir.is_dir();
    let summary_document = dir.join(SUMMARY_DOCUMENT).is_file();
    let variants_document = dir.join(VARIANTS_DOCUMENT).is_file();

    let ready = report_dir && summary_document && variants_document;
    let response = ReadinessResponse {
        ready,
        report_dir,
        summary_document,
        variants_document,
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Report projections for the served directory
///
/// Each request re-reads both documents; sections that fail to load are
/// reported inside the body, so the response is 200 whenever rendering works.
pub async fn report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
    let row_cap = query.row_cap.unwrap_or_else(|| state.default_row_cap());
    let loader = ReportLoader::new(row_cap).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let format = match query.format.as_deref() {
        None => OutputFormat::Json,
        Some(name) => OutputFormat::parse(name)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown report format: {}", name)))?,
    };

    let source = DirectorySource::new(state.report_dir());
    let report = loader.load(&source).await;
    if !report.is_complete() {
        warn!("Serving report with unavailable sections from {}", source.location());
    }

    let body = renderer_for(format, query.filter)
        .render(&report.view())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    info!("Report served as {:?} (row cap {})", format, row_cap);
    Ok(([(header::CONTENT_TYPE, format.mime_type())], body).into_response())
}

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_details("Bad request", msg),
            ),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
