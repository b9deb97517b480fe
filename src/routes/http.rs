//! Service-level endpoints: welcome banner and health probe.

use axum::{response::IntoResponse, Json};
use tracing::instrument;

use crate::protocol::HealthOut;

#[instrument(level = "info")]
pub async fn http_root() -> &'static str { "Welcome to the Azbuka API" }

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }
