//! Registry-wide checks
//!
//! These run once per validation run, after every selected version has been
//! checked, no matter how many versions were targeted.

use super::trait_def::Finding;
use crate::registry::{RegistryIndex, ReleaseStore};

/// Scope tag for findings that concern the registry as a whole
pub const GLOBAL_SCOPE: &str = "global";

/// Run the index-to-disk cross checks
///
/// 1. every index entry has a release directory
/// 2. no version is registered twice
/// 3. the `latest` pointer names a registered version
pub fn run_global_checks(index: &RegistryIndex, store: &ReleaseStore) -> Vec<Finding> {
  let mut findings = Vec::new();

  for record in &index.versions {
    if !store.contains(&record.version) {
      findings.push(Finding::error(
        &record.version,
        "registered in index but release directory is missing",
      ));
    }
  }

  for version in index.duplicate_versions() {
    findings.push(Finding::error(version, "registered more than once in index"));
  }

  if let Some(latest) = &index.latest
    && index.find(&latest.version).is_none()
  {
    findings.push(Finding::warning(
      GLOBAL_SCOPE,
      format!("latest pointer names unregistered version {}", latest.version),
    ));
  }

  findings
}
