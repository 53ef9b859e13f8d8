//! Rule runner for executing validation rules

use super::trait_def::{Finding, Rule, RuleContext};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Ordered collection of rules applied to every version
pub struct RuleSet {
  rules: Vec<Arc<dyn Rule>>,
}

impl RuleSet {
  /// Create an empty rule set
  pub fn new() -> Self {
    Self { rules: Vec::new() }
  }

  /// Append a rule; rules run in the order they were added
  pub fn add_rule(&mut self, rule: Arc<dyn Rule>) {
    self.rules.push(rule);
  }

  /// Run every rule against one version
  ///
  /// A rule that returns an error or panics contributes a single error
  /// finding and the remaining rules still run.
  pub fn run_all(&self, ctx: &RuleContext) -> Vec<Finding> {
    let mut findings = Vec::new();

    for rule in &self.rules {
      tracing::debug!(
        rule = rule.name(),
        description = rule.description(),
        version = ctx.version(),
        "running rule"
      );

      match panic::catch_unwind(AssertUnwindSafe(|| rule.run(ctx))) {
        Ok(Ok(mut emitted)) => findings.append(&mut emitted),
        Ok(Err(err)) => {
          tracing::warn!(rule = rule.name(), version = ctx.version(), error = %err, "rule failed");
          findings.push(Finding::error(
            ctx.version(),
            format!("rule {} failed to run: {}", rule.name(), err),
          ));
        }
        Err(payload) => {
          let reason = panic_message(payload.as_ref());
          tracing::warn!(rule = rule.name(), version = ctx.version(), reason = %reason, "rule panicked");
          findings.push(Finding::error(
            ctx.version(),
            format!("rule {} failed to run: {}", rule.name(), reason),
          ));
        }
      }
    }

    findings
  }

  /// Get all registered rules
  pub fn rules(&self) -> &[Arc<dyn Rule>] {
    &self.rules
  }
}

impl Default for RuleSet {
  fn default() -> Self {
    Self::new()
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(msg) = payload.downcast_ref::<&str>() {
    (*msg).to_string()
  } else if let Some(msg) = payload.downcast_ref::<String>() {
    msg.clone()
  } else {
    "panic with non-string payload".to_string()
  }
}

/// Create a rule set with all built-in rules, in execution order
pub fn create_default_rule_set() -> RuleSet {
  let mut rules = RuleSet::new();

  rules.add_rule(Arc::new(super::required_files::RequiredFilesRule));
  rules.add_rule(Arc::new(super::config_structure::ConfigStructureRule));
  rules.add_rule(Arc::new(super::feature_folders::FeatureFoldersRule));
  rules.add_rule(Arc::new(super::markdown_content::MarkdownContentRule));
  rules.add_rule(Arc::new(super::traceability::TraceabilityRule));
  rules.add_rule(Arc::new(super::index_consistency::IndexConsistencyRule));
  rules.add_rule(Arc::new(super::latest_mirror::LatestMirrorRule));

  rules
}
