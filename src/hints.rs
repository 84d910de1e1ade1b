//! Hint generation: prompt → provider → quality gate → result or fallback.
//!
//! Single attempt per request, no retries. Any provider failure or empty
//! output degrades to the canned hint for the requested level, so the caller
//! always gets something to render. Failure details only go to the log.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument, warn};

use crate::config::Prompts;
use crate::domain::{AssignmentContext, HintLevel, HintResult, QualityVerdict};
use crate::error::HintError;
use crate::fallback::fallback_hint;
use crate::prompt::PromptComposer;
use crate::provider::HintProvider;
use crate::quality::{validate_hint_quality, QualityGatePolicy};

/// The only error text end users ever see.
pub const USER_FACING_ERROR: &str = "Unable to generate hint at this time. Please try again.";

/// Cheap to clone; all clones share one provider handle.
#[derive(Clone)]
pub struct HintGenerator {
  provider: Arc<dyn HintProvider>,
  composer: PromptComposer,
  gate: QualityGatePolicy,
}

impl HintGenerator {
  pub fn new(provider: Arc<dyn HintProvider>, prompts: Prompts, gate: QualityGatePolicy) -> Self {
    Self { provider, composer: PromptComposer::new(prompts), gate }
  }

  pub fn provider_name(&self) -> &str {
    self.provider.name()
  }

  pub fn gate_policy(&self) -> QualityGatePolicy {
    self.gate
  }

  /// One provider attempt. The returned hint is the provider text with
  /// surrounding whitespace trimmed; blank output counts as empty and takes
  /// the fallback path.
  #[instrument(
    level = "info",
    skip(self, ctx, user_query),
    fields(title = %ctx.title, %level, query_len = user_query.len(), provider = self.provider.name())
  )]
  pub async fn generate_hint(&self, ctx: &AssignmentContext, user_query: &str, level: HintLevel) -> HintResult {
    match self.try_generate(ctx, user_query, level).await {
      Ok(hint) => {
        info!(target: "hint", %level, hint_len = hint.len(), "Hint generated");
        HintResult::Success { hint, level, timestamp: Utc::now() }
      }
      Err(e) => {
        match &e {
          HintError::QualityGate(reason) => {
            warn!(target: "hint", %level, %reason, "Hint rejected by quality gate; serving fallback")
          }
          _ => error!(target: "hint", %level, error = %e, "Hint generation failed; serving fallback"),
        }
        Self::failure(level)
      }
    }
  }

  /// Canned hint for `level`; out-of-range levels were already clamped to 1.
  pub fn fallback_hint(level: HintLevel) -> &'static str {
    fallback_hint(level)
  }

  pub fn validate_hint_quality(hint: &str) -> QualityVerdict {
    validate_hint_quality(hint)
  }

  fn failure(level: HintLevel) -> HintResult {
    HintResult::Failure {
      error: USER_FACING_ERROR.to_string(),
      fallback_hint: Self::fallback_hint(level).to_string(),
    }
  }

  async fn try_generate(&self, ctx: &AssignmentContext, user_query: &str, level: HintLevel) -> Result<String, HintError> {
    let prompt = self.composer.compose(ctx, user_query, level);
    let hint = self.provider.generate(&prompt).await?.trim().to_string();
    if hint.is_empty() {
      return Err(HintError::EmptyResponse);
    }

    let verdict = validate_hint_quality(&hint);
    if !verdict.is_valid {
      match self.gate {
        QualityGatePolicy::Enforce => return Err(HintError::QualityGate(verdict.reason)),
        QualityGatePolicy::Observe => {
          warn!(target: "hint", %level, reason = %verdict.reason, "Hint failed quality gate (observe only)")
        }
      }
    }
    Ok(hint)
  }
}
