//! `release-registry list`

use crate::core::context::RegistryContext;
use crate::core::error::RegistryResult;
use crate::registry::LatestPointer;
use crate::registry::release::display_value;
use serde::Serialize;

/// One index entry as shown by `list`
#[derive(Debug, Serialize)]
pub struct ListEntry {
  pub version: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub created_at: Option<String>,
  pub features: Vec<String>,
  /// Whether the release directory exists
  pub on_disk: bool,
}

#[derive(Debug, Serialize)]
pub struct ListReport {
  pub versions: Vec<ListEntry>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub latest: Option<LatestPointer>,
}

/// Run the list command
pub fn run_list(ctx: &RegistryContext, json: bool) -> RegistryResult<()> {
  let index = ctx.require_index()?;
  let store = ctx.store();

  let report = ListReport {
    versions: index
      .versions
      .iter()
      .map(|record| ListEntry {
        version: record.version.clone(),
        created_at: record.created_at.as_ref().map(display_value),
        features: record.features.clone(),
        on_disk: store.contains(&record.version),
      })
      .collect(),
    latest: index.latest.clone(),
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  if report.versions.is_empty() {
    println!("No versions registered in {}", ctx.index_path().display());
    return Ok(());
  }

  println!("📦 {} registered version(s)", report.versions.len());
  println!();
  for entry in &report.versions {
    let status = if entry.on_disk { "✅" } else { "⚠️  missing directory" };
    let features = if entry.features.is_empty() {
      "-".to_string()
    } else {
      entry.features.join(", ")
    };
    println!("   {}  [{}]  {}", entry.version, features, status);
  }

  if let Some(latest) = &report.latest {
    println!();
    match &latest.synced_at {
      Some(synced_at) => println!("🔖 latest -> {} (synced {})", latest.version, display_value(synced_at)),
      None => println!("🔖 latest -> {}", latest.version),
    }
  }

  Ok(())
}
