use crate::core::error::{ConfigError, RegistryError, RegistryResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for release-registry
/// Searched in order: registry.toml, .registry.toml, .config/registry.toml
///
/// Every field has a default, so a registry without a config file behaves
/// exactly like one with an empty file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
  /// Directory holding one subdirectory per version (relative to the root)
  #[serde(default = "default_releases_dir")]
  pub releases_dir: PathBuf,

  /// Central index document (relative to the root)
  #[serde(default = "default_index_path")]
  pub index_path: PathBuf,

  /// Where the rendered report is written (relative to the root)
  #[serde(default = "default_report_path")]
  pub report_path: PathBuf,

  #[serde(default)]
  pub rules: RulesConfig,
}

fn default_releases_dir() -> PathBuf {
  PathBuf::from("releases")
}

fn default_index_path() -> PathBuf {
  PathBuf::from("releases.json")
}

fn default_report_path() -> PathBuf {
  PathBuf::from("validation-report.md")
}

/// Tunables for the validation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
  /// Literal markers left behind by the release templates
  #[serde(default = "default_placeholder_markers")]
  pub placeholder_markers: Vec<String>,

  /// Also treat unrendered `{{name}}` template variables as placeholders
  #[serde(default = "default_true")]
  pub detect_template_variables: bool,

  /// Headings that open the changelog section of release.md
  #[serde(default = "default_changelog_markers")]
  pub changelog_markers: Vec<String>,

  /// Changelog bodies at or below this many characters are reported as sparse
  #[serde(default = "default_min_changelog_length")]
  pub min_changelog_length: usize,

  /// Feature names in current use; others are reported as info
  #[serde(default = "default_known_features")]
  pub known_features: Vec<String>,
}

fn default_placeholder_markers() -> Vec<String> {
  vec!["待填写".to_string(), "{{ }}".to_string()]
}

fn default_true() -> bool {
  true
}

fn default_changelog_markers() -> Vec<String> {
  vec!["## Changelog".to_string(), "## 变更记录".to_string()]
}

fn default_min_changelog_length() -> usize {
  50
}

fn default_known_features() -> Vec<String> {
  ["fct", "welcome", "fixture", "maintain"]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for RulesConfig {
  fn default() -> Self {
    Self {
      placeholder_markers: default_placeholder_markers(),
      detect_template_variables: default_true(),
      changelog_markers: default_changelog_markers(),
      min_changelog_length: default_min_changelog_length(),
      known_features: default_known_features(),
    }
  }
}

impl RulesConfig {
  /// Validate rule configuration
  pub fn validate(&self) -> RegistryResult<()> {
    if self.placeholder_markers.iter().any(|m| m.trim().is_empty()) {
      return Err(RegistryError::Config(ConfigError::InvalidField {
        field: "rules.placeholder_markers".to_string(),
        reason: "markers must not be blank".to_string(),
      }));
    }

    if self.changelog_markers.is_empty() {
      return Err(RegistryError::Config(ConfigError::InvalidField {
        field: "rules.changelog_markers".to_string(),
        reason: "at least one changelog heading is required".to_string(),
      }));
    }

    if self.changelog_markers.iter().any(|m| m.trim().is_empty()) {
      return Err(RegistryError::Config(ConfigError::InvalidField {
        field: "rules.changelog_markers".to_string(),
        reason: "markers must not be blank".to_string(),
      }));
    }

    Ok(())
  }
}

impl Default for RegistryConfig {
  fn default() -> Self {
    Self {
      releases_dir: default_releases_dir(),
      index_path: default_index_path(),
      report_path: default_report_path(),
      rules: RulesConfig::default(),
    }
  }
}

impl RegistryConfig {
  /// Find config file in search order: registry.toml, .registry.toml, .config/registry.toml
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = vec![
      root.join("registry.toml"),
      root.join(".registry.toml"),
      root.join(".config").join("registry.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config for a registry root, falling back to defaults when no file exists
  pub fn load(root: &Path) -> RegistryResult<Self> {
    let Some(config_path) = Self::find_config_path(root) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: RegistryConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .rules
      .validate()
      .with_context(|| format!("Invalid rule configuration in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded registry config");
    Ok(config)
  }
}
