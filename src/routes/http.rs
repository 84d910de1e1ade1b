//! HTTP endpoint handlers. These are thin wrappers that forward to the hint core.
//! Each handler is instrumented and logs basic request/result info.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use tracing::{info, instrument};

use crate::domain::iso_timestamp;
use crate::hints::HintGenerator;
use crate::protocol::*;
use crate::state::AppState;

const SERVICE_NAME: &str = "CipherSQLStudio Backend";

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { status: "OK", timestamp: iso_timestamp(&Utc::now()), service: SERVICE_NAME })
}

/// Always 200 once the body parses; success vs fallback is in the payload.
#[instrument(
  level = "info",
  skip(state, body),
  fields(title = %body.assignment_context.title, level = %body.hint_level)
)]
pub async fn http_post_hint(
  State(state): State<Arc<AppState>>,
  Json(body): Json<HintIn>,
) -> impl IntoResponse {
  let query = body.user_query.as_deref().unwrap_or_default();
  let result = state.hints.generate_hint(&body.assignment_context, query, body.hint_level).await;
  info!(target: "hint", success = result.is_success(), level = %body.hint_level, text_len = result.display_text().len(), "HTTP hint served");
  Json(result)
}

#[instrument(level = "info", skip(body), fields(hint_len = body.hint.len()))]
pub async fn http_post_validate_hint(Json(body): Json<ValidateHintIn>) -> impl IntoResponse {
  let verdict = HintGenerator::validate_hint_quality(&body.hint);
  info!(target: "hint", is_valid = verdict.is_valid, "HTTP hint quality checked");
  Json(verdict)
}

pub async fn http_not_found() -> impl IntoResponse {
  (StatusCode::NOT_FOUND, Json(ErrorOut { error: "Route not found".into() }))
}
