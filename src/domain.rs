//! Domain models used by the hint pipeline: assignment context, hint level,
//! hint result and quality verdict.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Read-only view of the assignment the learner is working on.
/// Owned by the assignment store; the hint pipeline never mutates it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentContext {
  pub title: String,
  pub difficulty: String, // free-form (e.g., "easy", "medium", "hard")
  pub problem_statement: String,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub requirements: Vec<String>,
}

/// `"requirements": null` reads the same as a missing key.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// How specific a hint should be: 1 = strategy, 2 = concepts, 3 = detailed concepts.
///
/// Every constructor clamps, so anything outside 1..=3 (or not an integer at all)
/// becomes level 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "u8")]
pub struct HintLevel(u8);

impl HintLevel {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 3;

  pub fn new(raw: i64) -> Self {
    match u8::try_from(raw) {
      Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Self(v),
      _ => Self::default(),
    }
  }

  pub fn from_raw(raw: Option<i64>) -> Self {
    raw.map(Self::new).unwrap_or_default()
  }

  pub fn get(self) -> u8 {
    self.0
  }
}

impl Default for HintLevel {
  fn default() -> Self {
    Self(Self::MIN)
  }
}

impl From<i64> for HintLevel {
  fn from(raw: i64) -> Self {
    Self::new(raw)
  }
}

impl From<serde_json::Value> for HintLevel {
  fn from(v: serde_json::Value) -> Self {
    Self::from_raw(v.as_i64())
  }
}

impl From<HintLevel> for u8 {
  fn from(level: HintLevel) -> Self {
    level.0
  }
}

impl std::fmt::Display for HintLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Outcome of one hint request. Exactly one variant is ever produced.
///
/// Serialized with a boolean `success` discriminator:
/// `{ success: true, hint, level, timestamp }` or
/// `{ success: false, error, fallbackHint }`.
#[derive(Clone, Debug, PartialEq)]
pub enum HintResult {
  Success {
    hint: String,
    level: HintLevel,
    timestamp: DateTime<Utc>,
  },
  Failure {
    error: String,
    fallback_hint: String,
  },
}

impl HintResult {
  pub fn is_success(&self) -> bool {
    matches!(self, HintResult::Success { .. })
  }

  /// The text the hint panel should render, whichever variant this is.
  pub fn display_text(&self) -> &str {
    match self {
      HintResult::Success { hint, .. } => hint,
      HintResult::Failure { fallback_hint, .. } => fallback_hint,
    }
  }
}

/// ISO-8601 / RFC 3339 with milliseconds and a `Z` suffix.
pub fn iso_timestamp(ts: &DateTime<Utc>) -> String {
  ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Serialize for HintResult {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      HintResult::Success { hint, level, timestamp } => {
        let mut s = serializer.serialize_struct("HintResult", 4)?;
        s.serialize_field("success", &true)?;
        s.serialize_field("hint", hint)?;
        s.serialize_field("level", level)?;
        s.serialize_field("timestamp", &iso_timestamp(timestamp))?;
        s.end()
      }
      HintResult::Failure { error, fallback_hint } => {
        let mut s = serializer.serialize_struct("HintResult", 3)?;
        s.serialize_field("success", &false)?;
        s.serialize_field("error", error)?;
        s.serialize_field("fallbackHint", fallback_hint)?;
        s.end()
      }
    }
  }
}

/// Result of the quality gate for a single hint. Not persisted.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QualityVerdict {
  pub is_valid: bool,
  pub reason: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn hint_level_clamps_out_of_range() {
    assert_eq!(HintLevel::new(2).get(), 2);
    assert_eq!(HintLevel::new(0).get(), 1);
    assert_eq!(HintLevel::new(4).get(), 1);
    assert_eq!(HintLevel::new(-3).get(), 1);
    assert_eq!(HintLevel::from_raw(None).get(), 1);
  }

  #[test]
  fn hint_level_deserializes_leniently() {
    let lvl: HintLevel = serde_json::from_value(json!(3)).unwrap();
    assert_eq!(lvl.get(), 3);
    for v in [json!(null), json!("2"), json!(2.5), json!(7), json!([1])] {
      let lvl: HintLevel = serde_json::from_value(v).unwrap();
      assert_eq!(lvl, HintLevel::default());
    }
  }

  #[test]
  fn context_requirements_default_to_empty() {
    let ctx: AssignmentContext = serde_json::from_value(json!({
      "title": "Top customers",
      "difficulty": "easy",
      "problemStatement": "List customers."
    }))
    .unwrap();
    assert!(ctx.requirements.is_empty());
  }

  #[test]
  fn null_requirements_read_as_empty() {
    let ctx: AssignmentContext = serde_json::from_value(json!({
      "title": "t",
      "difficulty": "easy",
      "problemStatement": "p",
      "requirements": null
    }))
    .unwrap();
    assert!(ctx.requirements.is_empty());

    let prompt = crate::prompt::PromptComposer::default().compose(&ctx, "", HintLevel::default());
    assert!(prompt.contains("Requirements: None specified"));
  }

  #[test]
  fn success_serializes_with_boolean_tag() {
    let ts = DateTime::parse_from_rfc3339("2026-10-16T08:15:30.123Z")
      .unwrap()
      .with_timezone(&Utc);
    let r = HintResult::Success { hint: "Think.".into(), level: HintLevel::new(2), timestamp: ts };
    assert_eq!(
      serde_json::to_value(&r).unwrap(),
      json!({ "success": true, "hint": "Think.", "level": 2, "timestamp": "2026-10-16T08:15:30.123Z" })
    );
  }

  #[test]
  fn failure_serializes_with_fallback() {
    let r = HintResult::Failure { error: "oops".into(), fallback_hint: "try".into() };
    assert_eq!(
      serde_json::to_value(&r).unwrap(),
      json!({ "success": false, "error": "oops", "fallbackHint": "try" })
    );
    assert_eq!(r.display_text(), "try");
    assert!(!r.is_success());
  }
}
