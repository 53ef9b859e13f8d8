//! Markdown content check
//!
//! Looks for template leftovers and for a reference to the release version in
//! release.md and review.md.

use super::trait_def::{Finding, Rule, RuleContext};
use crate::core::config::RulesConfig;
use crate::core::error::RegistryResult;
use crate::registry::LATEST_VERSION;
use crate::registry::release::{RELEASE_DOC, REVIEW_DOC};
use regex::Regex;
use std::sync::LazyLock;

/// Unrendered template variables such as `{{version}}` or `{{ }}`
static TEMPLATE_VARIABLE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\{\{\s*[A-Za-z0-9_]*\s*\}\}").expect("template variable pattern is valid"));

/// Release documents are filled in and reference their version
pub struct MarkdownContentRule;

impl Rule for MarkdownContentRule {
  fn name(&self) -> &'static str {
    "markdown-content"
  }

  fn description(&self) -> &'static str {
    "release.md and review.md have no placeholders and mention the version"
  }

  fn run(&self, ctx: &RuleContext) -> RegistryResult<Vec<Finding>> {
    let version = ctx.version();
    let mut findings = Vec::new();

    for doc in [RELEASE_DOC, REVIEW_DOC] {
      // Absence is reported by required-files
      let Some(content) = ctx.release.read_doc(doc)? else {
        continue;
      };

      if has_placeholder(&content, ctx.rules) {
        findings.push(Finding::warning(
          version,
          format!("{} contains unfilled placeholder content", doc),
        ));
      }

      if version != LATEST_VERSION && !content.contains(version) {
        findings.push(Finding::warning(version, format!("no version reference found in {}", doc)));
      }
    }

    Ok(findings)
  }
}

fn has_placeholder(content: &str, rules: &RulesConfig) -> bool {
  rules.placeholder_markers.iter().any(|marker| content.contains(marker.as_str()))
    || (rules.detect_template_variables && TEMPLATE_VARIABLE.is_match(content))
}
