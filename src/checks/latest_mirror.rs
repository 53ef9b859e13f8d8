//! Latest mirror check
//!
//! The `latest` directory is a copy of some released version. Its config.json
//! is marked `isLatest` and names the copied version in `sourceVersion`, which
//! should agree with the index's `latest` pointer.

use super::trait_def::{Finding, Rule, RuleContext};
use crate::core::error::RegistryResult;
use crate::registry::LATEST_VERSION;

/// The `latest` directory mirrors the version the index points at
pub struct LatestMirrorRule;

impl Rule for LatestMirrorRule {
  fn name(&self) -> &'static str {
    "latest-mirror"
  }

  fn description(&self) -> &'static str {
    "The latest directory is marked isLatest and matches the index pointer"
  }

  fn run(&self, ctx: &RuleContext) -> RegistryResult<Vec<Finding>> {
    let version = ctx.version();
    if version != LATEST_VERSION {
      return Ok(Vec::new());
    }

    let load = ctx.release.load_config()?;
    let Some(config) = load.parsed() else {
      return Ok(Vec::new());
    };

    let mut findings = Vec::new();

    if !config.is_latest() {
      findings.push(Finding::warning(version, "latest directory is not marked isLatest"));
    }

    if let Some(pointer) = &ctx.index.latest {
      let source = config.source_version().unwrap_or("none");
      if source != pointer.version {
        findings.push(Finding::warning(
          version,
          format!(
            "latest mirror out of sync with index pointer (source {}, index {})",
            source, pointer.version
          ),
        ));
      }
    }

    if findings.is_empty() {
      findings.push(Finding::passed(version, "latest mirror matches index pointer"));
    }

    Ok(findings)
  }
}
