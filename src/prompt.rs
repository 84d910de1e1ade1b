//! Prompt composition for hint generation.
//!
//! The prompt is a fixed system block followed by a per-call user block,
//! separated by a blank line. Composition is a pure function of its inputs.

use crate::config::Prompts;
use crate::domain::{AssignmentContext, HintLevel};
use crate::util::fill_template;

const BLOCK_SEPARATOR: &str = "\n\n";
const REQUIREMENTS_SEPARATOR: &str = ", ";
pub const NO_REQUIREMENTS: &str = "None specified";
pub const NO_QUERY: &str = "No query provided yet";

#[derive(Clone, Debug, Default)]
pub struct PromptComposer {
  prompts: Prompts,
}

impl PromptComposer {
  pub fn new(prompts: Prompts) -> Self {
    Self { prompts }
  }

  pub fn compose(&self, ctx: &AssignmentContext, user_query: &str, level: HintLevel) -> String {
    let mut out = self.system_block().to_string();
    out.push_str(BLOCK_SEPARATOR);
    out.push_str(&self.user_block(ctx, user_query, level));
    out
  }

  pub fn system_block(&self) -> &str {
    &self.prompts.hint_system
  }

  pub fn user_block(&self, ctx: &AssignmentContext, user_query: &str, level: HintLevel) -> String {
    let requirements = if ctx.requirements.iter().all(|r| r.trim().is_empty()) {
      NO_REQUIREMENTS.to_string()
    } else {
      ctx.requirements.join(REQUIREMENTS_SEPARATOR)
    };
    let query = if user_query.trim().is_empty() { NO_QUERY } else { user_query };
    let level = level.to_string();

    fill_template(
      &self.prompts.hint_user_template,
      &[
        ("title", ctx.title.as_str()),
        ("difficulty", ctx.difficulty.as_str()),
        ("problem", ctx.problem_statement.as_str()),
        ("requirements", requirements.as_str()),
        ("query", query),
        ("level", level.as_str()),
      ],
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ctx(requirements: &[&str]) -> AssignmentContext {
    AssignmentContext {
      title: "High earners".into(),
      difficulty: "medium".into(),
      problem_statement: "Find employees earning more than their manager.".into(),
      requirements: requirements.iter().map(|s| s.to_string()).collect(),
    }
  }

  #[test]
  fn same_inputs_give_identical_prompts() {
    let composer = PromptComposer::default();
    let c = ctx(&["Use a self join", "Return name only"]);
    let a = composer.compose(&c, "SELECT name", HintLevel::new(2));
    let b = composer.compose(&c, "SELECT name", HintLevel::new(2));
    assert_eq!(a, b);
  }

  #[test]
  fn renders_context_fields_and_level() {
    let p = PromptComposer::default().compose(&ctx(&["Use a self join", "Return name only"]), "SELECT name", HintLevel::new(3));
    assert!(p.contains("Title: High earners"));
    assert!(p.contains("Difficulty: medium"));
    assert!(p.contains("Problem: Find employees earning more than their manager."));
    assert!(p.contains("Requirements: Use a self join, Return name only"));
    assert!(p.contains("USER'S CURRENT QUERY:\nSELECT name"));
    assert!(p.contains("HINT LEVEL REQUESTED: 3"));
  }

  #[test]
  fn substitutes_sentinels_for_missing_inputs() {
    let composer = PromptComposer::default();
    let p = composer.compose(&ctx(&[]), "", HintLevel::default());
    assert!(p.contains(&format!("Requirements: {NO_REQUIREMENTS}")));
    assert!(p.contains(NO_QUERY));

    let p = composer.compose(&ctx(&[]), "   \n", HintLevel::default());
    assert!(p.contains(NO_QUERY));
  }

  #[test]
  fn blank_requirements_use_sentinel() {
    let composer = PromptComposer::default();
    for reqs in [&[""][..], &["", "  "][..]] {
      let p = composer.compose(&ctx(reqs), "x", HintLevel::default());
      assert!(p.contains(&format!("Requirements: {NO_REQUIREMENTS}\n")), "{reqs:?}");
    }
  }

  #[test]
  fn system_block_comes_first_then_blank_line() {
    let composer = PromptComposer::default();
    let p = composer.compose(&ctx(&[]), "x", HintLevel::default());
    let expected_head = format!("{}\n\nASSIGNMENT CONTEXT:", composer.system_block());
    assert!(p.starts_with(&expected_head));
    assert!(composer.system_block().contains("NEVER provide the complete SQL query"));
    assert!(composer.system_block().contains("Level 3"));
  }

  #[test]
  fn custom_templates_are_used() {
    let composer = PromptComposer::new(Prompts {
      hint_system: "SYS".into(),
      hint_user_template: "{title}|{query}|{level}".into(),
    });
    let p = composer.compose(&ctx(&[]), "{level}", HintLevel::new(2));
    assert_eq!(p, "SYS\n\nHigh earners|{level}|2");
  }
}
