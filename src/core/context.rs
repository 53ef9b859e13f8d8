//! Registry context - build once, pass everywhere
//!
//! `RegistryContext` resolves the registry root, loads `registry.toml`,
//! applies command-line overrides and loads the index a single time in
//! main.rs. Commands receive it by reference.
//!
//! The index is loaded eagerly but a failure is kept rather than returned:
//! `validate` reports it as a finding and carries on, while `list` and
//! `resolve` need the index and surface the error instead.

use crate::core::config::RegistryConfig;
use crate::core::error::{ConfigError, IndexError, RegistryError, RegistryResult};
use crate::registry::{RegistryIndex, ReleaseStore};
use std::path::{Path, PathBuf};

/// Command-line values that take precedence over registry.toml
#[derive(Debug, Clone, Default)]
pub struct ContextOverrides {
  pub releases_dir: Option<PathBuf>,
  pub index_path: Option<PathBuf>,
  pub report_path: Option<PathBuf>,
}

/// Shared registry state for a single invocation
pub struct RegistryContext {
  /// Registry root; relative config paths are resolved against it
  pub root: PathBuf,

  /// Effective configuration (file values with overrides applied)
  pub config: RegistryConfig,

  /// Parsed index, or an empty one when loading failed
  pub index: RegistryIndex,

  /// Why the index could not be loaded, if it could not
  pub index_error: Option<IndexError>,
}

impl RegistryContext {
  /// Build the context for a registry root
  pub fn build(root: &Path, overrides: ContextOverrides) -> RegistryResult<Self> {
    if !root.is_dir() {
      return Err(RegistryError::Config(ConfigError::RootNotFound {
        root: root.to_path_buf(),
      }));
    }

    let mut config = RegistryConfig::load(root)?;
    if let Some(releases_dir) = overrides.releases_dir {
      config.releases_dir = releases_dir;
    }
    if let Some(index_path) = overrides.index_path {
      config.index_path = index_path;
    }
    if let Some(report_path) = overrides.report_path {
      config.report_path = report_path;
    }

    let index_path = root.join(&config.index_path);
    let (index, index_error) = match RegistryIndex::load(&index_path) {
      Ok(index) => (index, None),
      Err(err) => {
        tracing::warn!(error = %err, "continuing with an empty index");
        (RegistryIndex::default(), Some(err))
      }
    };

    tracing::debug!(
      root = %root.display(),
      releases = %config.releases_dir.display(),
      index = %index_path.display(),
      versions = index.versions.len(),
      "registry context ready"
    );

    Ok(Self {
      root: root.to_path_buf(),
      config,
      index,
      index_error,
    })
  }

  /// The release store under this root
  pub fn store(&self) -> ReleaseStore {
    ReleaseStore::new(self.root.join(&self.config.releases_dir))
  }

  pub fn index_path(&self) -> PathBuf {
    self.root.join(&self.config.index_path)
  }

  pub fn report_path(&self) -> PathBuf {
    self.root.join(&self.config.report_path)
  }

  /// The index, or the load error for commands that cannot work without it
  pub fn require_index(&self) -> RegistryResult<&RegistryIndex> {
    match &self.index_error {
      None => Ok(&self.index),
      Some(err) => Err(RegistryError::Index(err.clone())),
    }
  }
}
