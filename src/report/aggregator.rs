//! Result aggregation
//!
//! Findings are sorted into four append-only buckets. Nothing is merged or
//! deduplicated; each finding keeps the version it came from.

use crate::checks::{Finding, Severity};
use serde::Serialize;

/// Per-bucket counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
  pub passed: usize,
  pub errors: usize,
  pub warnings: usize,
  pub info: usize,
}

/// Aggregated findings of one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
  pub errors: Vec<Finding>,
  pub warnings: Vec<Finding>,
  pub info: Vec<Finding>,
  pub passed: Vec<Finding>,
}

impl ValidationResult {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a finding to the bucket matching its severity
  pub fn add(&mut self, finding: Finding) {
    match finding.severity {
      Severity::Error => self.errors.push(finding),
      Severity::Warning => self.warnings.push(finding),
      Severity::Info => self.info.push(finding),
      Severity::Passed => self.passed.push(finding),
    }
  }

  /// Append findings in emission order
  pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
    for finding in findings {
      self.add(finding);
    }
  }

  /// Whether the run produced anything that should fail a strict build
  pub fn has_blocking_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  pub fn has_warnings(&self) -> bool {
    !self.warnings.is_empty()
  }

  /// Findings of one severity, in emission order
  pub fn bucket(&self, severity: Severity) -> &[Finding] {
    match severity {
      Severity::Error => &self.errors,
      Severity::Warning => &self.warnings,
      Severity::Info => &self.info,
      Severity::Passed => &self.passed,
    }
  }

  pub fn summary(&self) -> Summary {
    Summary {
      passed: self.passed.len(),
      errors: self.errors.len(),
      warnings: self.warnings.len(),
      info: self.info.len(),
    }
  }
}
