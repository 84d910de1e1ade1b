//! CipherSQLStudio · SQL hint backend
//!
//! - Axum HTTP API: health, hint generation, hint quality check
//! - LLM-generated, non-revealing hints with canned fallbacks
//!
//! Important env variables:
//!   PORT             : u16 (default 5000)
//!   LLM_PROVIDER     : "gemini" (default) or "openai"
//!   LLM_API_KEY      : provider credential; without it every hint is a canned fallback
//!   LLM_MODEL        : default "gemini-1.5-flash" / "gpt-4o-mini"
//!   LLM_BASE_URL     : provider API root override
//!   LLM_TIMEOUT_SECS : provider request timeout (default 20)
//!   HINT_CONFIG_PATH : path to TOML config (prompts + quality gate policy)
//!   CORS_ORIGINS     : comma-separated allowed origins (default: any)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

mod config;
mod domain;
mod error;
mod fallback;
mod hints;
mod prompt;
mod protocol;
mod provider;
mod quality;
mod routes;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::cors_origins_from_env;
use crate::routes::build_router;
use crate::state::AppState;

const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // One shared hint generator (provider client + prompts + gate policy).
  let state = Arc::new(AppState::new());

  let app = build_router(state, cors_origins_from_env());

  let port = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .unwrap_or(DEFAULT_PORT);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "ciphersql_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "ciphersql_backend", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "ciphersql_backend", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}
