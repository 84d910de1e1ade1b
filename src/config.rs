//! Configuration: hint prompts + gate policy from TOML, provider settings from env.
//!
//! See `HintConfig`, `Prompts` and `LlmSettings` for expected schema.
//! Nothing here is fatal: missing or broken configuration degrades to defaults,
//! and a missing API key surfaces later as provider-call failures.

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::quality::QualityGatePolicy;

const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct HintConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub quality_gate: QualityGatePolicy,
}

/// Prompt templates for hint generation. Defaults are tuned for SQL practice.
///
/// `hint_user_template` placeholders: `{title}`, `{difficulty}`, `{problem}`,
/// `{requirements}`, `{query}`, `{level}`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Prompts {
  pub hint_system: String,
  pub hint_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      hint_system: "You are a SQL learning assistant for CipherSQLStudio. Your role is to provide helpful hints for SQL practice problems WITHOUT giving away the complete solution.

CRITICAL RULES:
1. NEVER provide the complete SQL query or exact syntax
2. NEVER reveal the final answer directly
3. Focus on concepts, strategy, and approach
4. Guide users to think through the problem step by step
5. Use encouraging and educational language
6. Keep hints concise but meaningful (2-3 sentences max)

HINT LEVELS:
- Level 1: High-level strategy and approach
- Level 2: More specific guidance on SQL concepts needed
- Level 3: Detailed conceptual guidance (still no exact syntax)

Your goal is to help users learn SQL by thinking through problems, not by copying solutions.".into(),
      hint_user_template: "ASSIGNMENT CONTEXT:
Title: {title}
Difficulty: {difficulty}
Problem: {problem}
Requirements: {requirements}

USER'S CURRENT QUERY:
{query}

HINT LEVEL REQUESTED: {level}

Please provide a helpful hint that guides the user toward the solution without revealing the exact answer. Focus on SQL concepts and problem-solving approach.".into(),
    }
  }
}

/// Attempt to load `HintConfig` from HINT_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_hint_config_from_env() -> Option<HintConfig> {
  let path = std::env::var("HINT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<HintConfig>(&s) {
      Ok(cfg) => {
        info!(target: "ciphersql_backend", %path, quality_gate = ?cfg.quality_gate, "Loaded hint config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "ciphersql_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "ciphersql_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// Which text-generation backend to talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
  Gemini,
  OpenAi,
}

impl ProviderKind {
  pub fn default_model(self) -> &'static str {
    match self {
      ProviderKind::Gemini => "gemini-1.5-flash",
      ProviderKind::OpenAi => "gpt-4o-mini",
    }
  }

  pub fn default_base_url(self) -> &'static str {
    match self {
      ProviderKind::Gemini => "https://generativelanguage.googleapis.com",
      ProviderKind::OpenAi => "https://api.openai.com/v1",
    }
  }
}

/// Provider settings, read once at startup and shared read-only afterwards.
#[derive(Clone, Debug)]
pub struct LlmSettings {
  pub kind: ProviderKind,
  pub api_key: Option<String>,
  pub model: String,
  pub base_url: String,
  pub timeout: Duration,
}

impl LlmSettings {
  pub fn from_env() -> Self {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  /// Same as `from_env`, with the variable source injected.
  pub fn from_lookup<F>(lookup: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let kind = match get("LLM_PROVIDER").map(|v| v.to_ascii_lowercase()).as_deref() {
      None | Some("gemini") => ProviderKind::Gemini,
      Some("openai") => ProviderKind::OpenAi,
      Some(other) => {
        warn!(target: "ciphersql_backend", provider = %other, "Unknown LLM_PROVIDER; using gemini");
        ProviderKind::Gemini
      }
    };

    let timeout_secs = match get("LLM_TIMEOUT_SECS") {
      None => DEFAULT_TIMEOUT_SECS,
      Some(raw) => match raw.parse::<u64>() {
        Ok(n) if n > 0 => n,
        _ => {
          warn!(target: "ciphersql_backend", value = %raw, default = DEFAULT_TIMEOUT_SECS, "Invalid LLM_TIMEOUT_SECS; using default");
          DEFAULT_TIMEOUT_SECS
        }
      },
    };

    Self {
      kind,
      api_key: get("LLM_API_KEY"),
      model: get("LLM_MODEL").unwrap_or_else(|| kind.default_model().into()),
      base_url: get("LLM_BASE_URL")
        .unwrap_or_else(|| kind.default_base_url().into())
        .trim_end_matches('/')
        .to_string(),
      timeout: Duration::from_secs(timeout_secs),
    }
  }
}

/// Allowed CORS origins from CORS_ORIGINS (comma-separated). None means any origin.
pub fn cors_origins_from_env() -> Option<Vec<String>> {
  let raw = std::env::var("CORS_ORIGINS").ok()?;
  let origins: Vec<String> = raw
    .split(',')
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .collect();
  if origins.is_empty() { None } else { Some(origins) }
}
