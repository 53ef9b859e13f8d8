//! Central registry index (`releases.json`)
//!
//! The index lists every known version, most recent first by convention, and
//! an optional pointer to the version mirrored into the `latest` directory.

use crate::core::error::IndexError;
use crate::registry::release::LATEST_VERSION;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parsed registry index
///
/// Read once per run and treated as an immutable snapshot afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryIndex {
  #[serde(default)]
  pub versions: Vec<VersionRecord>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub latest: Option<LatestPointer>,
}

/// One registered version
///
/// Timestamps are informational and kept as whatever JSON the index holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
  pub version: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<Value>,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub features: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub previous_version: Option<String>,
}

/// Pointer to the version currently mirrored as `latest`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestPointer {
  pub version: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub synced_at: Option<Value>,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub features: Vec<String>,
}

/// `"features": null` reads the same as an absent list
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RegistryIndex {
  /// Load and parse the index document
  pub fn load(path: &Path) -> Result<Self, IndexError> {
    if !path.exists() {
      return Err(IndexError::NotFound { path: path.to_path_buf() });
    }

    let bytes = fs::read(path).map_err(|e| IndexError::Unreadable {
      path: path.to_path_buf(),
      reason: e.to_string(),
    })?;

    serde_json::from_slice(&bytes).map_err(|e| IndexError::Unreadable {
      path: path.to_path_buf(),
      reason: e.to_string(),
    })
  }

  /// Find the first record registered under `version`
  pub fn find(&self, version: &str) -> Option<&VersionRecord> {
    self.versions.iter().find(|v| v.version == version)
  }

  /// Versions that appear more than once, each reported once in index order
  pub fn duplicate_versions(&self) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for record in &self.versions {
      let version = record.version.as_str();
      if !seen.insert(version) && reported.insert(version) {
        duplicates.push(version);
      }
    }

    duplicates
  }

  /// Highest registered version by string order, ignoring `latest`
  ///
  /// Versions are calendar-derived (`YYYYMMDD`), so string order is release order.
  pub fn newest_version(&self) -> Option<&str> {
    self
      .versions
      .iter()
      .map(|v| v.version.as_str())
      .filter(|v| *v != LATEST_VERSION)
      .max()
  }

  /// Resolve a requested version to a concrete one
  ///
  /// `latest` follows the index pointer, falling back to the newest registered
  /// version. Anything else resolves to itself when registered.
  pub fn resolve(&self, requested: &str) -> Result<String, IndexError> {
    if requested == LATEST_VERSION {
      if let Some(latest) = &self.latest
        && !latest.version.is_empty()
      {
        return Ok(latest.version.clone());
      }
      return self
        .newest_version()
        .map(str::to_string)
        .ok_or_else(|| IndexError::UnknownVersion {
          version: requested.to_string(),
        });
    }

    match self.find(requested) {
      Some(record) => Ok(record.version.clone()),
      None => Err(IndexError::UnknownVersion {
        version: requested.to_string(),
      }),
    }
  }
}
