//! Index consistency check
//!
//! Cross-checks a release directory against its entry in the registry index.

use super::trait_def::{Finding, Rule, RuleContext};
use crate::core::error::RegistryResult;
use crate::registry::LATEST_VERSION;
use crate::utils::sorted_features;

/// Version is registered and its feature list matches config.json
pub struct IndexConsistencyRule;

impl Rule for IndexConsistencyRule {
  fn name(&self) -> &'static str {
    "index-consistency"
  }

  fn description(&self) -> &'static str {
    "Version is registered in the index with the same feature list as config.json"
  }

  fn run(&self, ctx: &RuleContext) -> RegistryResult<Vec<Finding>> {
    let version = ctx.version();

    let Some(record) = ctx.index.find(version) else {
      if version == LATEST_VERSION {
        return Ok(Vec::new());
      }
      return Ok(vec![Finding::error(version, "not registered in index")]);
    };

    // Unreadable configs were already reported by config-structure
    let Ok(load) = ctx.release.load_config() else {
      return Ok(Vec::new());
    };
    let Some(config) = load.parsed() else {
      return Ok(Vec::new());
    };

    let finding = if sorted_features(record.features.iter().map(String::as_str)) == sorted_features(config.declared_features()) {
      Finding::passed(version, "index entry matches config.json")
    } else {
      Finding::warning(version, "feature lists diverge between index and config")
    };

    Ok(vec![finding])
  }
}
