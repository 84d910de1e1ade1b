//! Canned, level-appropriate hints.
//!
//! These guarantee the hint panel always renders something, even when the
//! provider is down, unconfigured, or returned nothing usable.

use crate::domain::HintLevel;

const LEVEL_1: &str = "Start by identifying which tables you need and what columns contain the information you're looking for. Think about the relationships between tables.";
const LEVEL_2: &str = "Consider what SQL clauses you might need: WHERE for filtering, JOIN for combining tables, GROUP BY for aggregation, or ORDER BY for sorting.";
const LEVEL_3: &str = "Break down the problem into smaller parts. What conditions need to be met? Do you need to aggregate data? Are there any specific patterns to match?";

/// Fixed lookup; `HintLevel` is already clamped, so anything odd lands on level 1.
pub fn fallback_hint(level: HintLevel) -> &'static str {
  match level.get() {
    2 => LEVEL_2,
    3 => LEVEL_3,
    _ => LEVEL_1,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn each_level_has_its_own_hint() {
    let hints = [1, 2, 3].map(|l| fallback_hint(HintLevel::new(l)));
    assert_ne!(hints[0], hints[1]);
    assert_ne!(hints[1], hints[2]);
    assert_ne!(hints[0], hints[2]);
  }

  #[test]
  fn out_of_range_levels_use_level_one() {
    let one = fallback_hint(HintLevel::new(1));
    assert_eq!(fallback_hint(HintLevel::new(0)), one);
    assert_eq!(fallback_hint(HintLevel::new(4)), one);
    assert_eq!(fallback_hint(HintLevel::from_raw(None)), one);
  }

  #[test]
  fn gate_verdicts_on_canned_hints() {
    use crate::quality::validate_hint_quality;
    assert!(validate_hint_quality(fallback_hint(HintLevel::new(1))).is_valid);
    assert!(validate_hint_quality(fallback_hint(HintLevel::new(3))).is_valid);
    // "GROUP BY for aggregation" reads as a grouping clause to the gate.
    // Fallbacks are never gated, so this is only recorded here.
    assert!(!validate_hint_quality(fallback_hint(HintLevel::new(2))).is_valid);
  }
}
