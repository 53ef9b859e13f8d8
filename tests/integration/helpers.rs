//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Changelog body long enough to count as populated
pub const CHANGELOG: &str = "## Changelog\n- Added fixture coverage for the welcome flow and fixed the FCT retry timing\n";

/// A throwaway registry root with a `releases/` store and `releases.json`
pub struct TestRegistry {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRegistry {
  /// Create an empty registry root (no store, no index)
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Add a release that passes every rule
  pub fn add_release(&self, version: &str, features: &[&str]) -> Result<PathBuf> {
    let dir = self.path.join("releases").join(version);
    std::fs::create_dir_all(&dir)?;

    let config = serde_json::json!({
      "version": version,
      "createdAt": "2024-01-01T08:00:00Z",
      "features": features,
    });
    std::fs::write(dir.join("config.json"), serde_json::to_string_pretty(&config)?)?;
    std::fs::write(dir.join("release.md"), format!("# Release {}\n\n{}", version, CHANGELOG))?;
    std::fs::write(dir.join("review.md"), format!("# Review {}\n\nApproved.\n", version))?;

    for feature in features {
      std::fs::create_dir_all(dir.join(feature))?;
      std::fs::write(dir.join(feature).join("test.md"), "- [x] smoke test\n")?;
    }

    Ok(dir)
  }

  /// Write the index with the given `(version, features)` entries
  pub fn write_index(&self, entries: &[(&str, &[&str])], latest: Option<&str>) -> Result<()> {
    let versions: Vec<_> = entries
      .iter()
      .map(|(version, features)| {
        serde_json::json!({
          "version": version,
          "createdAt": "2024-01-01T08:00:00Z",
          "features": features,
        })
      })
      .collect();

    let mut index = serde_json::json!({ "versions": versions });
    if let Some(latest) = latest {
      index["latest"] = serde_json::json!({ "version": latest, "syncedAt": "2024-01-02T00:00:00Z" });
    }

    std::fs::write(self.path.join("releases.json"), serde_json::to_string_pretty(&index)?)?;
    Ok(())
  }

  /// Write a file relative to the registry root
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }

  /// Remove a file relative to the registry root
  pub fn remove_file(&self, path: &str) -> Result<()> {
    std::fs::remove_file(self.path.join(path))?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run the release-registry binary, whatever its exit status
pub fn run_release_registry(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_release-registry");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run release-registry")
}

/// Run the release-registry binary and require success
pub fn run_release_registry_ok(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_release_registry(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "release-registry command failed: release-registry {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Stdout as a string
pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}
