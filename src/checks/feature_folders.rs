//! Feature folder check
//!
//! Declared features come from config.json; the folders on disk must follow.

use super::trait_def::{Finding, Rule, RuleContext};
use crate::core::error::RegistryResult;
use crate::registry::release::FEATURE_TEST_DOC;

/// Each declared feature has a folder with a test.md
pub struct FeatureFoldersRule;

impl Rule for FeatureFoldersRule {
  fn name(&self) -> &'static str {
    "feature-folders"
  }

  fn description(&self) -> &'static str {
    "Every feature declared in config.json has a folder containing test.md"
  }

  fn run(&self, ctx: &RuleContext) -> RegistryResult<Vec<Finding>> {
    let version = ctx.version();

    // Missing or unparseable configs are reported by config-structure
    let load = ctx.release.load_config()?;
    let Some(config) = load.parsed() else {
      return Ok(Vec::new());
    };

    let mut findings = Vec::new();
    for feature in config.declared_features() {
      let feature_dir = ctx.release.feature_dir(feature);
      if !feature_dir.is_dir() {
        findings.push(Finding::error(
          version,
          format!("declared feature folder missing: {}", feature),
        ));
      } else if feature_dir.join(FEATURE_TEST_DOC).is_file() {
        findings.push(Finding::passed(version, format!("feature {} has test.md", feature)));
      } else {
        findings.push(Finding::warning(version, format!("feature {} is missing test.md", feature)));
      }
    }

    Ok(findings)
  }
}
