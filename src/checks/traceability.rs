//! Traceability check
//!
//! release.md must carry a changelog section with real content.

use super::trait_def::{Finding, Rule, RuleContext};
use crate::core::error::RegistryResult;
use crate::registry::release::RELEASE_DOC;

/// release.md has a non-trivial changelog section
pub struct TraceabilityRule;

impl Rule for TraceabilityRule {
  fn name(&self) -> &'static str {
    "traceability"
  }

  fn description(&self) -> &'static str {
    "release.md contains a populated changelog section"
  }

  fn run(&self, ctx: &RuleContext) -> RegistryResult<Vec<Finding>> {
    let version = ctx.version();
    let Some(content) = ctx.release.read_doc(RELEASE_DOC)? else {
      return Ok(Vec::new());
    };

    let finding = match changelog_section(&content, &ctx.rules.changelog_markers) {
      None => Finding::warning(version, "missing changelog section"),
      Some(section) if section.trim().chars().count() > ctx.rules.min_changelog_length => {
        Finding::passed(version, "changelog section present")
      }
      Some(_) => Finding::info(version, "changelog present but sparse"),
    };

    Ok(vec![finding])
  }
}

/// Text following the first configured marker found in `content`
///
/// The section ends at the next occurrence of the same marker, if any.
fn changelog_section<'a>(content: &'a str, markers: &[String]) -> Option<&'a str> {
  markers.iter().find_map(|marker| {
    let (_, rest) = content.split_once(marker.as_str())?;
    Some(rest.split(marker.as_str()).next().unwrap_or(rest))
  })
}
