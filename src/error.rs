//! Error taxonomy for the hint pipeline.
//!
//! None of these reach an end user: `HintGenerator` converts every one of them
//! into the fallback variant of `HintResult` and logs the detail for operators.

use thiserror::Error;

/// Failure talking to the text-generation provider.
#[derive(Debug, Error)]
pub enum ProviderError {
  /// No API key was configured at startup.
  #[error("provider API key is not configured")]
  MissingApiKey,

  /// Network error, timeout, or a client that could not be built.
  #[error("provider transport error: {0}")]
  Transport(#[from] reqwest::Error),

  /// Non-2xx from the provider (auth, quota, bad request, outage).
  #[error("provider HTTP {status}: {message}")]
  Http { status: u16, message: String },

  /// The provider refused the prompt (safety filters and similar).
  #[error("provider blocked the prompt: {0}")]
  Blocked(String),

  /// Response body did not have the expected shape.
  #[error("provider response decode error: {0}")]
  Decode(String),
}

/// Why a generation attempt ended on the fallback path.
#[derive(Debug, Error)]
pub enum HintError {
  #[error(transparent)]
  Provider(#[from] ProviderError),

  #[error("provider returned no usable text")]
  EmptyResponse,

  #[error("hint failed the quality gate: {0}")]
  QualityGate(String),
}
