//! Minimal OpenAI client for hint generation.
//!
//! We only call chat.completions and request plain text. The composed prompt
//! goes out as a single user message.
//! Calls are instrumented and log model names, latencies, and response sizes (not contents).
//!
//! NOTE: We never log the API key.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{http_client, http_error, HintProvider, USER_AGENT_VALUE};
use crate::config::LlmSettings;
use crate::error::ProviderError;

const HINT_TEMPERATURE: f32 = 0.2;

#[derive(Clone)]
pub struct OpenAiProvider {
  client: reqwest::Client,
  api_key: String,
  model: String,
  url: String,
}

impl OpenAiProvider {
  pub fn new(settings: &LlmSettings, api_key: String) -> Result<Self, ProviderError> {
    Ok(Self {
      client: http_client(settings)?,
      api_key,
      model: settings.model.clone(),
      url: format!("{}/chat/completions", settings.base_url),
    })
  }
}

#[async_trait]
impl HintProvider for OpenAiProvider {
  fn name(&self) -> &str {
    "openai"
  }

  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
    let req = ChatCompletionRequest {
      model: &self.model,
      messages: vec![ChatMessageReq { role: "user", content: prompt }],
      temperature: HINT_TEMPERATURE,
    };

    let start = Instant::now();
    let res = self.client.post(&self.url)
      .header(USER_AGENT, USER_AGENT_VALUE)
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await?;

    if !res.status().is_success() {
      return Err(http_error(res).await);
    }

    let body: ChatCompletionResponse = res.json().await
      .map_err(|e| ProviderError::Decode(e.to_string()))?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = response_text(body);
    info!(elapsed = ?start.elapsed(), response_len = text.len(), "OpenAI response received");
    Ok(text)
  }
}

fn response_text(body: ChatCompletionResponse) -> String {
  body.choices.into_iter().next()
    .and_then(|c| c.message.content)
    .unwrap_or_default()
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
  model: &'a str,
  messages: Vec<ChatMessageReq<'a>>,
  temperature: f32,
}
#[derive(Serialize)]
struct ChatMessageReq<'a> { role: &'a str, content: &'a str }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  #[serde(default)] choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn takes_first_choice_content() {
    let body: ChatCompletionResponse = serde_json::from_str(r#"{
      "choices": [{"message": {"role": "assistant", "content": "Which tables hold orders?"}}],
      "usage": {"prompt_tokens": 100, "completion_tokens": 6, "total_tokens": 106}
    }"#).unwrap();
    assert_eq!(response_text(body), "Which tables hold orders?");
  }

  #[test]
  fn null_content_or_no_choices_is_empty() {
    let body: ChatCompletionResponse =
      serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
    assert_eq!(response_text(body), "");
    let body: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
    assert_eq!(response_text(body), "");
  }
}
