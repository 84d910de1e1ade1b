//! Minimal Gemini client: one `generateContent` call per hint.
//!
//! We log model names, latencies, and response sizes (not contents).
//! The API key travels in the `x-goog-api-key` header and is never logged.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{http_client, http_error, HintProvider, USER_AGENT_VALUE};
use crate::config::LlmSettings;
use crate::error::ProviderError;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiProvider {
  client: reqwest::Client,
  api_key: String,
  model: String,
  url: String,
}

impl GeminiProvider {
  pub fn new(settings: &LlmSettings, api_key: String) -> Result<Self, ProviderError> {
    Ok(Self {
      client: http_client(settings)?,
      api_key,
      model: settings.model.clone(),
      url: format!("{}/v1beta/models/{}:generateContent", settings.base_url, settings.model),
    })
  }
}

#[async_trait]
impl HintProvider for GeminiProvider {
  fn name(&self) -> &str {
    "gemini"
  }

  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
    let req = GenerateContentRequest {
      contents: vec![Content { parts: vec![PartReq { text: prompt }] }],
    };

    let start = Instant::now();
    let res = self.client.post(&self.url)
      .header(USER_AGENT, USER_AGENT_VALUE)
      .header(CONTENT_TYPE, "application/json")
      .header(API_KEY_HEADER, &self.api_key)
      .json(&req).send().await?;

    if !res.status().is_success() {
      return Err(http_error(res).await);
    }

    let body: GenerateContentResponse = res.json().await
      .map_err(|e| ProviderError::Decode(e.to_string()))?;
    if let Some(usage) = &body.usage_metadata {
      info!(prompt_tokens = ?usage.prompt_token_count, completion_tokens = ?usage.candidates_token_count, total_tokens = ?usage.total_token_count, "Gemini usage");
    }
    let text = response_text(body)?;
    info!(elapsed = ?start.elapsed(), response_len = text.len(), "Gemini response received");
    Ok(text)
  }
}

/// Concatenate the text parts of the first candidate. A prompt-level block is
/// an error; a candidate with no text is just empty.
fn response_text(body: GenerateContentResponse) -> Result<String, ProviderError> {
  if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
    return Err(ProviderError::Blocked(reason));
  }
  let text = body
    .candidates
    .into_iter()
    .next()
    .and_then(|c| c.content)
    .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
    .unwrap_or_default();
  Ok(text)
}

// --- Gemini DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
  contents: Vec<Content<'a>>,
}
#[derive(Serialize)]
struct Content<'a> { parts: Vec<PartReq<'a>> }
#[derive(Serialize)]
struct PartReq<'a> { text: &'a str }

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
  #[serde(default)] candidates: Vec<Candidate>,
  #[serde(default)] prompt_feedback: Option<PromptFeedback>,
  #[serde(default)] usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct Candidate { #[serde(default)] content: Option<ContentResp> }
#[derive(Deserialize)]
struct ContentResp { #[serde(default)] parts: Vec<PartResp> }
#[derive(Deserialize)]
struct PartResp { #[serde(default)] text: Option<String> }
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback { #[serde(default)] block_reason: Option<String> }
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
  #[serde(default)] prompt_token_count: Option<u32>,
  #[serde(default)] candidates_token_count: Option<u32>,
  #[serde(default)] total_token_count: Option<u32>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(json: &str) -> GenerateContentResponse {
    serde_json::from_str(json).unwrap()
  }

  #[test]
  fn joins_parts_of_first_candidate() {
    let body = parse(r#"{
      "candidates": [
        {"content": {"role": "model", "parts": [{"text": "Think about "}, {"text": "the tables."}]}},
        {"content": {"parts": [{"text": "ignored"}]}}
      ],
      "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 9, "totalTokenCount": 129}
    }"#);
    assert_eq!(response_text(body).unwrap(), "Think about the tables.");
  }

  #[test]
  fn no_candidates_is_empty_text() {
    assert_eq!(response_text(parse("{}")).unwrap(), "");
    assert_eq!(response_text(parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)).unwrap(), "");
  }

  #[test]
  fn blocked_prompt_is_an_error() {
    let body = parse(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#);
    assert!(matches!(response_text(body), Err(ProviderError::Blocked(r)) if r == "SAFETY"));
  }

  #[test]
  fn request_body_shape() {
    let req = GenerateContentRequest { contents: vec![Content { parts: vec![PartReq { text: "hello" }] }] };
    assert_eq!(
      serde_json::to_value(&req).unwrap(),
      serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]})
    );
  }
}
