//! Validation engine
//!
//! Drives one validation run: resolve the target versions, apply the rule set
//! to each, then run the registry-wide checks once. The engine never fails on
//! data problems; everything it finds ends up in the returned result.

use crate::checks::{Finding, GLOBAL_SCOPE, RuleContext, RuleSet, run_global_checks};
use crate::core::context::RegistryContext;
use crate::core::error::RegistryResult;
use crate::registry::ReleaseStore;
use crate::report::ValidationResult;
use rayon::prelude::*;

/// Which versions a run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
  /// Every subdirectory of the release store
  All,
  /// A single, explicitly named version
  Version(String),
}

impl Target {
  pub fn from_arg(version: Option<String>) -> Self {
    match version {
      Some(version) => Target::Version(version),
      None => Target::All,
    }
  }
}

/// Validate the registry
///
/// Findings land in the result in a fixed order: the index load failure (if
/// any), then each version in name order with its rules in registration
/// order, then the global checks.
pub fn validate(ctx: &RegistryContext, target: &Target, rules: &RuleSet) -> RegistryResult<ValidationResult> {
  let store = ctx.store();
  let versions = target_versions(&store, target)?;
  let mut result = ValidationResult::new();

  if let Some(err) = &ctx.index_error {
    result.add(Finding::error(GLOBAL_SCOPE, err.to_string()));
  }

  tracing::debug!(versions = versions.len(), rules = rules.rules().len(), "validating");

  let per_version: Vec<Vec<Finding>> = versions
    .par_iter()
    .map(|version| validate_version(ctx, &store, version, rules))
    .collect();

  for findings in per_version {
    result.extend(findings);
  }

  result.extend(run_global_checks(&ctx.index, &store));

  tracing::debug!(
    errors = result.errors.len(),
    warnings = result.warnings.len(),
    "validation finished"
  );
  Ok(result)
}

fn target_versions(store: &ReleaseStore, target: &Target) -> RegistryResult<Vec<String>> {
  match target {
    Target::All => store.versions(),
    Target::Version(version) => Ok(vec![version.clone()]),
  }
}

/// A name that stays inside the store when joined onto it
fn is_version_name(version: &str) -> bool {
  !(version.is_empty() || version.contains(['/', '\\']) || version == "." || version == "..")
}

fn validate_version(ctx: &RegistryContext, store: &ReleaseStore, version: &str, rules: &RuleSet) -> Vec<Finding> {
  if !is_version_name(version) {
    return vec![Finding::error(version, "not a valid version name")];
  }

  let release = store.dir(version);
  if !release.exists() {
    return vec![Finding::error(version, "release directory does not exist")];
  }

  let rule_ctx = RuleContext {
    release: &release,
    index: &ctx.index,
    rules: &ctx.config.rules,
  };
  rules.run_all(&rule_ctx)
}
