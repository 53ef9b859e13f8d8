//! Release directories and their `config.json`

use crate::core::error::{RegistryResult, ResultExt};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Version identifier of the mirror directory
pub const LATEST_VERSION: &str = "latest";

pub const CONFIG_FILE: &str = "config.json";
pub const RELEASE_DOC: &str = "release.md";
pub const REVIEW_DOC: &str = "review.md";
pub const FEATURE_TEST_DOC: &str = "test.md";

/// Files every release directory must carry, in reporting order
pub const REQUIRED_FILES: [&str; 3] = [CONFIG_FILE, RELEASE_DOC, REVIEW_DOC];

/// Per-release metadata (`config.json`)
///
/// Kept as the raw JSON object. Release configs are hand-edited, so a field
/// of the wrong type is something to report, not a reason to drop the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseConfig {
  fields: Map<String, Value>,
}

impl ReleaseConfig {
  pub fn new(fields: Map<String, Value>) -> Self {
    Self { fields }
  }

  /// Whether `name` is present at all (an explicit `null` counts as present)
  pub fn has_field(&self, name: &str) -> bool {
    self.fields.contains_key(name)
  }

  /// Raw value of a field
  pub fn get(&self, name: &str) -> Option<&Value> {
    self.fields.get(name)
  }

  /// `version` when it is set to something other than null, false, 0 or ""
  pub fn version(&self) -> Option<&Value> {
    self.get("version").filter(|v| is_truthy(v))
  }

  /// `createdAt` when it is set to something other than null, false, 0 or ""
  pub fn created_at(&self) -> Option<&Value> {
    self.get("createdAt").filter(|v| is_truthy(v))
  }

  /// Whether this config belongs to the `latest` mirror
  pub fn is_latest(&self) -> bool {
    self.get("isLatest").is_some_and(is_truthy)
  }

  pub fn source_version(&self) -> Option<&str> {
    self.get("sourceVersion").and_then(Value::as_str)
  }

  /// Whether `features` is a list of names (or absent/null, meaning none)
  pub fn features_well_formed(&self) -> bool {
    match self.get("features") {
      None | Some(Value::Null) => true,
      Some(Value::Array(items)) => items.iter().all(Value::is_string),
      Some(_) => false,
    }
  }

  /// Declared feature names; anything that is not a string is skipped
  pub fn declared_features(&self) -> Vec<&str> {
    match self.get("features") {
      Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
      _ => Vec::new(),
    }
  }
}

/// Text form of a JSON value for messages: strings bare, everything else as JSON
pub fn display_value(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

/// Outcome of reading a release's `config.json`
#[derive(Debug, Clone)]
pub enum ConfigLoad {
  /// No config.json in the directory
  Missing,
  /// The file exists but is not a valid release config
  Invalid(String),
  Parsed(ReleaseConfig),
}

impl ConfigLoad {
  /// The parsed config, if any
  pub fn parsed(&self) -> Option<&ReleaseConfig> {
    match self {
      ConfigLoad::Parsed(config) => Some(config),
      _ => None,
    }
  }
}

/// One version directory inside the release store
#[derive(Debug, Clone)]
pub struct ReleaseDir {
  pub version: String,
  pub path: PathBuf,
}

impl ReleaseDir {
  pub fn new(version: impl Into<String>, path: impl Into<PathBuf>) -> Self {
    Self {
      version: version.into(),
      path: path.into(),
    }
  }

  pub fn exists(&self) -> bool {
    self.path.is_dir()
  }

  /// Path of a file directly inside the release directory
  pub fn file(&self, name: &str) -> PathBuf {
    self.path.join(name)
  }

  pub fn has_file(&self, name: &str) -> bool {
    self.file(name).is_file()
  }

  /// Path of a feature subdirectory
  pub fn feature_dir(&self, feature: &str) -> PathBuf {
    self.path.join(feature)
  }

  /// Read a markdown document, `None` when it does not exist
  pub fn read_doc(&self, name: &str) -> RegistryResult<Option<String>> {
    let path = self.file(name);
    match fs::read(&path) {
      Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
  }

  /// Read and parse `config.json`
  ///
  /// Parse failures are data, not faults. Field types are not checked here.
  pub fn load_config(&self) -> RegistryResult<ConfigLoad> {
    let path = self.file(CONFIG_FILE);
    let bytes = match fs::read(&path) {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ConfigLoad::Missing),
      Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    match serde_json::from_slice::<Value>(&bytes) {
      Ok(Value::Object(fields)) => Ok(ConfigLoad::Parsed(ReleaseConfig::new(fields))),
      Ok(other) => Ok(ConfigLoad::Invalid(format!(
        "expected a JSON object, found {}",
        json_kind(&other)
      ))),
      Err(e) => Ok(ConfigLoad::Invalid(e.to_string())),
    }
  }
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

/// The releases directory: one subdirectory per version
#[derive(Debug, Clone)]
pub struct ReleaseStore {
  pub root: PathBuf,
}

impl ReleaseStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn dir(&self, version: &str) -> ReleaseDir {
    ReleaseDir::new(version, self.root.join(version))
  }

  pub fn contains(&self, version: &str) -> bool {
    self.root.join(version).is_dir()
  }

  /// Names of all version directories, sorted
  ///
  /// A missing store yields no versions.
  pub fn versions(&self) -> RegistryResult<Vec<String>> {
    if !self.root.is_dir() {
      tracing::warn!(path = %self.root.display(), "release store does not exist");
      return Ok(Vec::new());
    }

    let mut versions = Vec::new();
    let entries =
      fs::read_dir(&self.root).with_context(|| format!("Failed to list {}", self.root.display()))?;

    for entry in entries {
      let entry = entry?;
      if !entry.file_type()?.is_dir() {
        continue;
      }
      match entry.file_name().into_string() {
        Ok(name) => versions.push(name),
        Err(name) => tracing::warn!(name = ?name, "skipping release directory with non UTF-8 name"),
      }
    }

    versions.sort();
    Ok(versions)
  }
}
