//! Text-generation providers.
//!
//! The hint pipeline only needs `generate(prompt) -> text`; everything
//! provider-specific (endpoints, auth headers, response shapes) lives in the
//! submodules. Handles are shared read-only across concurrent requests.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::config::{LlmSettings, ProviderKind};
use crate::error::ProviderError;

pub mod gemini;
pub mod openai;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

const USER_AGENT_VALUE: &str = "ciphersql-backend/0.1";
/// Max bytes of an upstream error body kept in error messages/logs.
const ERROR_SNIPPET_BYTES: usize = 300;

#[async_trait]
pub trait HintProvider: Send + Sync {
  /// Short label for logs ("gemini", "openai", ...).
  fn name(&self) -> &str;

  /// One non-streaming generation. Returns the raw text, possibly empty.
  async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Stand-in used when no API key is configured. Every call fails, and the
/// generator turns that into the canned fallback.
#[derive(Clone, Debug, Default)]
pub struct UnconfiguredProvider;

#[async_trait]
impl HintProvider for UnconfiguredProvider {
  fn name(&self) -> &str {
    "unconfigured"
  }

  async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
    Err(ProviderError::MissingApiKey)
  }
}

/// Build the provider described by `settings`. Never fails: problems are logged
/// and yield an `UnconfiguredProvider`.
pub fn build_provider(settings: &LlmSettings) -> Arc<dyn HintProvider> {
  let Some(api_key) = settings.api_key.clone() else {
    warn!(target: "ciphersql_backend", provider = ?settings.kind, "LLM_API_KEY not set; hints will use canned fallbacks.");
    return Arc::new(UnconfiguredProvider);
  };

  let built: Result<Arc<dyn HintProvider>, ProviderError> = match settings.kind {
    ProviderKind::Gemini => GeminiProvider::new(settings, api_key).map(|p| Arc::new(p) as Arc<dyn HintProvider>),
    ProviderKind::OpenAi => OpenAiProvider::new(settings, api_key).map(|p| Arc::new(p) as Arc<dyn HintProvider>),
  };

  match built {
    Ok(p) => {
      info!(
        target: "ciphersql_backend",
        provider = p.name(),
        model = %settings.model,
        base_url = %settings.base_url,
        timeout_secs = settings.timeout.as_secs(),
        "LLM provider enabled."
      );
      p
    }
    Err(e) => {
      error!(target: "ciphersql_backend", provider = ?settings.kind, error = %e, "Failed to build LLM client; hints will use canned fallbacks.");
      Arc::new(UnconfiguredProvider)
    }
  }
}

fn http_client(settings: &LlmSettings) -> Result<reqwest::Client, ProviderError> {
  Ok(reqwest::Client::builder().timeout(settings.timeout).build()?)
}

/// Turn a non-2xx response into `ProviderError::Http`, preferring the
/// provider's own `{"error": {"message": ...}}` text over the raw body.
async fn http_error(res: reqwest::Response) -> ProviderError {
  let status = res.status().as_u16();
  let body = res.text().await.unwrap_or_default();
  let message = extract_error_message(&body)
    .unwrap_or_else(|| crate::util::trunc_for_log(body.trim(), ERROR_SNIPPET_BYTES));
  ProviderError::Http { status, message }
}

/// Gemini and OpenAI share the same error envelope.
fn extract_error_message(body: &str) -> Option<String> {
  #[derive(serde::Deserialize)]
  struct EWrap { error: EObj }
  #[derive(serde::Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
