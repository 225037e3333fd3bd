//! Health check route

use axum::{http::StatusCode, Extension, Json};
use serde::Serialize;

use crate::readiness::Readiness;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    /// Whether the contacts table was provisioned at startup
    table_ready: bool,
    /// Current version of the application
    semver: &'static str,
    /// Commit hash of the current build (if available)
    rev: Option<&'static str>,
}

/// Health check endpoint
///
/// Returns `200 OK` when the contacts table is ready and `503 SERVICE_UNAVAILABLE`
/// otherwise, with version information in both cases.
pub async fn handler(
    Extension(readiness): Extension<Readiness>,
) -> (StatusCode, Json<HealthResponse>) {
    let table_ready = readiness.is_table_ready();

    let (status_code, status) = if table_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            table_ready,
            semver: env!("CARGO_PKG_VERSION"),
            rev: option_env!("GIT_REV"),
        }),
    )
}
