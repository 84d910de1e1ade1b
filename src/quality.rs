//! Quality gate for generated hints.
//!
//! Catches the cases where the model ignored its instructions and leaked
//! concrete, copy-pasteable SQL. Each pattern is one "forbidden shape".
//! Matching is case-insensitive.

use lazy_static::lazy_static;
use regex::{RegexSet, RegexSetBuilder};
use serde::Deserialize;

use crate::domain::QualityVerdict;

// `(?-u:\w)`: column names are ASCII word characters only.
const FORBIDDEN_SHAPES: &[&str] = &[
  // SELECT * FROM ...
  r"SELECT\s+\*\s+FROM",
  // WHERE col = 'literal'
  r#"WHERE\s+(?-u:\w)+\s*=\s*['"][^'"]+['"]"#,
  // JOIN t ON a.x = b.y
  r"JOIN\s+(?-u:\w)+\s+ON\s+(?-u:\w)+\.(?-u:\w)+\s*=\s*(?-u:\w)+\.(?-u:\w)+",
  r"GROUP\s+BY\s+(?-u:\w)+",
  r"ORDER\s+BY\s+(?-u:\w)+",
];

const REASON_LEAK: &str = "Hint contains too much specific SQL syntax";
const REASON_OK: &str = "Hint is appropriately conceptual";

lazy_static! {
  static ref FORBIDDEN: RegexSet = RegexSetBuilder::new(FORBIDDEN_SHAPES)
    .case_insensitive(true)
    .build()
    .unwrap();
}

/// What the generator does with a failing verdict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGatePolicy {
  /// Compute and log the verdict; return the hint unchanged.
  #[default]
  Observe,
  /// Replace a leaking hint with the canned fallback.
  Enforce,
}

pub fn validate_hint_quality(hint: &str) -> QualityVerdict {
  if FORBIDDEN.is_match(hint) {
    QualityVerdict { is_valid: false, reason: REASON_LEAK.into() }
  } else {
    QualityVerdict { is_valid: true, reason: REASON_OK.into() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_each_forbidden_shape() {
    let leaks = [
      "SELECT * FROM orders",
      "try: select   *   from customers",
      "add WHERE city = 'Paris' to your query",
      r#"use where status="shipped""#,
      "JOIN orders ON customers.id = orders.customer_id",
      "then group by country",
      "finish with ORDER BY total",
    ];
    for hint in leaks {
      let v = validate_hint_quality(hint);
      assert!(!v.is_valid, "should reject: {hint}");
      assert_eq!(v.reason, REASON_LEAK);
    }
  }

  #[test]
  fn accepts_conceptual_hints() {
    let ok = [
      "Consider which tables hold the relevant columns.",
      "Think about how you would filter rows before grouping them.",
      "A join needs a column that both tables share.",
      "Sorting happens last; which column decides the order?",
    ];
    for hint in ok {
      let v = validate_hint_quality(hint);
      assert!(v.is_valid, "should accept: {hint}");
      assert_eq!(v.reason, REASON_OK);
    }
  }

  #[test]
  fn word_classes_are_ascii_only() {
    assert!(validate_hint_quality("ORDER BY été").is_valid);
    assert!(validate_hint_quality("GROUP BY ñame").is_valid);
    assert!(!validate_hint_quality("ORDER BY e\u{301}te").is_valid);
    assert!(!validate_hint_quality("order by total_été").is_valid);
  }

  #[test]
  fn policy_parses_from_snake_case() {
    #[derive(Deserialize)]
    struct W { quality_gate: QualityGatePolicy }
    let w: W = toml::from_str("quality_gate = \"enforce\"").unwrap();
    assert_eq!(w.quality_gate, QualityGatePolicy::Enforce);
    assert_eq!(QualityGatePolicy::default(), QualityGatePolicy::Observe);
  }
}
