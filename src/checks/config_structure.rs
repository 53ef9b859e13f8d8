//! config.json structure check
//!
//! Validates required fields, the version/directory agreement and the
//! `createdAt` timestamp. A config that does not parse yields exactly one
//! error; the feature-folder and index rules stay silent about it. A config
//! that parses but carries mistyped fields is checked field by field.

use super::trait_def::{Finding, Rule, RuleContext};
use crate::core::error::RegistryResult;
use crate::registry::ConfigLoad;
use crate::registry::release::display_value;
use crate::utils::parse_timestamp;

/// Structural validation of a release's config.json
pub struct ConfigStructureRule;

impl Rule for ConfigStructureRule {
  fn name(&self) -> &'static str {
    "config-structure"
  }

  fn description(&self) -> &'static str {
    "config.json parses and carries version, createdAt and features"
  }

  fn run(&self, ctx: &RuleContext) -> RegistryResult<Vec<Finding>> {
    let version = ctx.version();
    let config = match ctx.release.load_config()? {
      ConfigLoad::Missing => return Ok(Vec::new()),
      ConfigLoad::Invalid(reason) => {
        return Ok(vec![Finding::error(version, format!("config.json parse failed: {}", reason))]);
      }
      ConfigLoad::Parsed(config) => config,
    };

    let mut findings = Vec::new();
    let mut structurally_valid = true;

    for field in ["version", "createdAt", "features"] {
      if !config.has_field(field) {
        structurally_valid = false;
        findings.push(Finding::error(
          version,
          format!("config.json missing required field: {}", field),
        ));
      }
    }

    if let Some(declared) = config.version()
      && declared.as_str() != Some(version)
      && !config.is_latest()
    {
      structurally_valid = false;
      findings.push(Finding::warning(
        version,
        format!(
          "config.json version ({}) does not match directory name",
          display_value(declared)
        ),
      ));
    }

    if let Some(created_at) = config.created_at()
      && created_at.as_str().and_then(parse_timestamp).is_none()
    {
      structurally_valid = false;
      findings.push(Finding::error(
        version,
        format!(
          "config.json createdAt is not a valid timestamp: {}",
          display_value(created_at)
        ),
      ));
    }

    if !config.features_well_formed() {
      structurally_valid = false;
      findings.push(Finding::error(version, "config.json features is not a list of names"));
    }

    for feature in config.declared_features() {
      if !ctx.rules.known_features.iter().any(|known| known == feature) {
        findings.push(Finding::info(version, format!("unknown feature name: {}", feature)));
      }
    }

    if structurally_valid {
      findings.push(Finding::passed(version, "config.json structure is valid"));
    }

    Ok(findings)
  }
}
