//! Rule trait abstraction for release validation
//!
//! Every validation rule implements the `Rule` trait and reports what it saw
//! as a list of findings. Rules never fail for malformed release data: a
//! missing file or a broken `config.json` is a finding. An `Err` from `run`
//! means the rule itself could not do its job (e.g. an unreadable file) and is
//! turned into an error finding by the runner.

use crate::core::config::RulesConfig;
use crate::core::error::RegistryResult;
use crate::registry::{RegistryIndex, ReleaseDir};
use serde::Serialize;

/// Severity level for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  /// Blocking problem
  Error,
  /// Should be addressed, not blocking
  Warning,
  /// Informational only
  Info,
  /// A check that succeeded
  Passed,
}

/// One reported observation, tagged with the version it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
  /// Version identifier, or `global` for registry-wide findings
  pub version: String,
  pub message: String,
  pub severity: Severity,
}

impl Finding {
  pub fn new(version: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
    Self {
      version: version.into(),
      message: message.into(),
      severity,
    }
  }

  pub fn error(version: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(version, Severity::Error, message)
  }

  pub fn warning(version: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(version, Severity::Warning, message)
  }

  pub fn info(version: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(version, Severity::Info, message)
  }

  pub fn passed(version: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(version, Severity::Passed, message)
  }
}

/// Everything a rule may look at for one version
///
/// The index is a snapshot shared by all versions of a run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
  pub release: &'a ReleaseDir,
  pub index: &'a RegistryIndex,
  pub rules: &'a RulesConfig,
}

impl<'a> RuleContext<'a> {
  /// Version under validation (the directory name)
  pub fn version(&self) -> &'a str {
    &self.release.version
  }
}

/// Validation rule
///
/// Rules are stateless and run in registration order for every version.
///
/// # Example
///
/// ```rust,ignore
/// struct ReadmeRule;
///
/// impl Rule for ReadmeRule {
///   fn name(&self) -> &'static str {
///     "readme"
///   }
///
///   fn description(&self) -> &'static str {
///     "Release directory carries a README"
///   }
///
///   fn run(&self, ctx: &RuleContext) -> RegistryResult<Vec<Finding>> {
///     if ctx.release.has_file("README.md") {
///       Ok(vec![Finding::passed(ctx.version(), "README present")])
///     } else {
///       Ok(vec![Finding::warning(ctx.version(), "README missing")])
///     }
///   }
/// }
/// ```
pub trait Rule: Send + Sync {
  /// Unique name for this rule (kebab-case)
  fn name(&self) -> &'static str;

  /// Human-readable description of what this rule validates
  fn description(&self) -> &'static str;

  /// Inspect one version and report findings
  fn run(&self, ctx: &RuleContext) -> RegistryResult<Vec<Finding>>;
}
