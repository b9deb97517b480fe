//! Azbuka · Russian Vocabulary Backend
//!
//! - Axum HTTP API over vocabulary, phrases and quiz questions
//! - Lesson generation (difficulty-tiered, stratified random sampling)
//! - In-memory content store seeded from built-in content and an optional TOML bank
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   CONTENT_PATH  : path to TOML content bank (vocab, phrases, questions)
//!   LOG_LEVEL     : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT    : "pretty" (default) or "json"

mod config;
mod domain;
mod error;
mod lesson;
mod logic;
mod protocol;
mod routes;
mod seeds;
mod state;
mod store;
mod telemetry;
mod util;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = AppConfig::from_env();

  // Shared state: content store populated from the bank and built-in seeds.
  let state = Arc::new(AppState::from_config(&cfg).await?);

  let app = build_router(state);

  let listener = TcpListener::bind(cfg.addr).await?;
  info!(target: "azbuka_backend", addr = %cfg.addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "azbuka_backend", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "azbuka_backend", error = %e, "Failed to listen for Ctrl-C; running until killed");
    std::future::pending::<()>().await;
  }
  info!(target: "azbuka_backend", "Shutdown signal received");
}
