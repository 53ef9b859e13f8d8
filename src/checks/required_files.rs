//! Required files check

use super::trait_def::{Finding, Rule, RuleContext};
use crate::core::error::RegistryResult;
use crate::registry::release::REQUIRED_FILES;

/// Every release directory carries config.json, release.md and review.md
pub struct RequiredFilesRule;

impl Rule for RequiredFilesRule {
  fn name(&self) -> &'static str {
    "required-files"
  }

  fn description(&self) -> &'static str {
    "Release directory contains config.json, release.md and review.md"
  }

  fn run(&self, ctx: &RuleContext) -> RegistryResult<Vec<Finding>> {
    let findings = REQUIRED_FILES
      .iter()
      .map(|file| {
        if ctx.release.has_file(file) {
          Finding::passed(ctx.version(), format!("required file present: {}", file))
        } else {
          Finding::error(ctx.version(), format!("missing required file: {}", file))
        }
      })
      .collect();

    Ok(findings)
  }
}
