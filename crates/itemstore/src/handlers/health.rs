//! Health check endpoint.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no store access)

use axum::http::StatusCode;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}
