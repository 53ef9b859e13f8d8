//! Integration tests for `release-registry validate`

use crate::helpers::{TestRegistry, run_release_registry, run_release_registry_ok, stdout};
use anyhow::Result;

#[test]
fn test_clean_release_passes() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["fct"])?;
  reg.write_index(&[("20240101", &["fct"])], None)?;

  let output = run_release_registry_ok(&reg.path, &["validate", "20240101", "--strict"])?;
  let out = stdout(&output);

  assert!(out.contains("- ❌ Errors: 0"), "{}", out);
  assert!(out.contains("- ⚠️ Warnings: 0"), "{}", out);
  assert!(out.contains("✅ All checks passed"), "{}", out);
  assert!(!out.contains("### ❌ Errors"));
  Ok(())
}

#[test]
fn test_report_written_and_echoed() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["fct"])?;
  reg.write_index(&[("20240101", &["fct"])], None)?;

  let output = run_release_registry_ok(&reg.path, &["validate"])?;
  assert!(reg.file_exists("validation-report.md"));

  let report = reg.read_file("validation-report.md")?;
  assert!(report.starts_with("### Validation time: "));
  assert!(report.contains("- [20240101] required file present: config.json"));
  assert!(stdout(&output).contains(&report));
  Ok(())
}

#[test]
fn test_custom_report_path_and_no_report() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["fct"])?;
  reg.write_index(&[("20240101", &["fct"])], None)?;

  run_release_registry_ok(&reg.path, &["validate", "--report", "out/check.md"])?;
  assert!(reg.file_exists("out/check.md"));
  assert!(!reg.file_exists("validation-report.md"));

  run_release_registry_ok(&reg.path, &["validate", "--no-report"])?;
  assert!(!reg.file_exists("validation-report.md"));
  Ok(())
}

#[test]
fn test_missing_review_is_single_error() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["fct"])?;
  reg.remove_file("releases/20240101/review.md")?;
  reg.write_index(&[("20240101", &["fct"])], None)?;

  let output = run_release_registry_ok(&reg.path, &["validate", "20240101", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  let errors = json["errors"].as_array().unwrap();
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0]["message"], "missing required file: review.md");
  assert_eq!(json["has_blocking_errors"], true);

  // Later rules still ran
  let passed: Vec<&str> = json["passed"]
    .as_array()
    .unwrap()
    .iter()
    .filter_map(|f| f["message"].as_str())
    .collect();
  assert!(passed.contains(&"index entry matches config.json"));
  assert!(passed.contains(&"changelog section present"));
  Ok(())
}

#[test]
fn test_strict_mode_controls_exit_code() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["fct", "welcome"])?;
  std::fs::remove_dir_all(reg.path.join("releases/20240101/fct"))?;
  reg.write_index(&[("20240101", &["fct", "welcome"])], None)?;

  let lenient = run_release_registry(&reg.path, &["validate"])?;
  assert!(lenient.status.success());
  assert!(stdout(&lenient).contains("- [20240101] declared feature folder missing: fct"));
  assert!(stdout(&lenient).contains("❌ Validation failed: 1 error(s)"));

  let strict = run_release_registry(&reg.path, &["validate", "--strict"])?;
  assert_eq!(strict.status.code(), Some(3));
  assert!(reg.file_exists("validation-report.md"));
  Ok(())
}

#[test]
fn test_warnings_do_not_fail_strict() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["fct"])?;
  reg.write_index(&[("20240101", &["fct", "welcome"])], None)?;

  let output = run_release_registry_ok(&reg.path, &["validate", "--strict"])?;
  let out = stdout(&output);
  assert!(out.contains("- [20240101] feature lists diverge between index and config"));
  assert!(out.contains("Validation passed with 1 warning(s)"));
  Ok(())
}

#[test]
fn test_feature_order_is_irrelevant() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["welcome", "fct"])?;
  reg.write_index(&[("20240101", &["fct", "welcome"])], None)?;

  let output = run_release_registry_ok(&reg.path, &["validate", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(json["summary"]["warnings"], 0);
  assert_eq!(json["summary"]["errors"], 0);
  Ok(())
}

#[test]
fn test_missing_index_still_validates() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["fct"])?;

  let output = run_release_registry_ok(&reg.path, &["validate", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  let errors = json["errors"].as_array().unwrap();
  assert_eq!(errors[0]["version"], "global");
  assert_eq!(errors[1]["version"], "20240101");
  assert_eq!(errors[1]["message"], "not registered in index");
  assert!(json["summary"]["passed"].as_u64().unwrap() >= 5);
  Ok(())
}

#[test]
fn test_orphan_reported_once_for_single_target() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["fct"])?;
  reg.add_release("20240201", &["fct"])?;
  reg.write_index(
    &[("20240101", &["fct"]), ("20240201", &["fct"]), ("20231201", &["fct"])],
    None,
  )?;

  let output = run_release_registry_ok(&reg.path, &["validate", "20240201", "--no-report"])?;
  let out = stdout(&output);
  assert_eq!(
    out
      .matches("- [20231201] registered in index but release directory is missing")
      .count(),
    1
  );
  assert!(!out.contains("[20240101]"));
  Ok(())
}

#[test]
fn test_invalid_config_only_affects_config_rules() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["fct"])?;
  reg.write_file("releases/20240101/config.json", "{ \"version\": \"20240101\", ")?;
  reg.write_index(&[("20240101", &["fct"])], None)?;

  let output = run_release_registry_ok(&reg.path, &["validate", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  let errors = json["errors"].as_array().unwrap();
  assert_eq!(errors.len(), 1);
  assert!(errors[0]["message"].as_str().unwrap().starts_with("config.json parse failed"));
  assert_eq!(json["summary"]["warnings"], 0);
  Ok(())
}

#[test]
fn test_latest_directory_is_special_cased() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["fct"])?;
  reg.write_file(
    "releases/latest/config.json",
    r#"{"version":"20240101","createdAt":"2024-01-01T08:00:00Z","features":[],"isLatest":true,"sourceVersion":"20240101"}"#,
  )?;
  reg.write_file(
    "releases/latest/release.md",
    &format!("# Latest release\n\n{}", crate::helpers::CHANGELOG),
  )?;
  reg.write_file("releases/latest/review.md", "# Review\n")?;
  reg.write_index(&[("20240101", &["fct"])], Some("20240101"))?;

  let output = run_release_registry_ok(&reg.path, &["validate", "--strict", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(json["summary"]["errors"], 0, "{}", json);
  assert_eq!(json["summary"]["warnings"], 0, "{}", json);
  let passed: Vec<&str> = json["passed"]
    .as_array()
    .unwrap()
    .iter()
    .filter_map(|f| f["message"].as_str())
    .collect();
  assert!(passed.contains(&"latest mirror matches index pointer"));
  Ok(())
}

#[test]
fn test_unknown_target_directory() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.write_index(&[], None)?;

  let output = run_release_registry_ok(&reg.path, &["validate", "20991231", "--no-report"])?;
  assert!(stdout(&output).contains("- [20991231] release directory does not exist"));
  Ok(())
}

#[test]
fn test_root_flag() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &["fct"])?;
  reg.write_index(&[("20240101", &["fct"])], None)?;

  let elsewhere = tempfile::TempDir::new()?;
  let root = reg.path.to_string_lossy().into_owned();
  run_release_registry_ok(elsewhere.path(), &["--root", &root, "validate"])?;
  assert!(reg.file_exists("validation-report.md"));
  Ok(())
}

#[test]
fn test_single_matching_release_is_clean() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.write_file(
    "releases/20240101/config.json",
    r#"{"version":"20240101","createdAt":"2024-01-01T00:00:00Z","features":["fct"]}"#,
  )?;
  reg.write_file(
    "releases/20240101/release.md",
    &format!("# Release 20240101\n\n{}", crate::helpers::CHANGELOG),
  )?;
  reg.write_file("releases/20240101/review.md", "# Review 20240101\n")?;
  reg.write_file("releases/20240101/fct/test.md", "- [x] smoke test\n")?;
  reg.write_index(&[("20240101", &["fct"])], None)?;

  let output = run_release_registry_ok(&reg.path, &["validate", "20240101", "--strict", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(json["summary"]["errors"], 0, "{}", json);
  assert_eq!(json["summary"]["warnings"], 0, "{}", json);
  assert!(json["summary"]["passed"].as_u64().unwrap() >= 5, "{}", json);
  assert_eq!(json["has_blocking_errors"], false);
  Ok(())
}

#[test]
fn test_mistyped_config_fields_are_checked_individually() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &[])?;
  reg.write_file(
    "releases/20240101/config.json",
    r#"{"version":20240101,"createdAt":"2024-01-01T00:00:00Z","features":["fct"]}"#,
  )?;
  reg.write_index(&[("20240101", &["fct"])], None)?;

  let output = run_release_registry_ok(&reg.path, &["validate", "--json"])?;
  let out = stdout(&output);
  let json: serde_json::Value = serde_json::from_str(&out)?;

  assert!(!out.contains("parse failed"), "{}", out);
  let errors: Vec<&str> = json["errors"]
    .as_array()
    .unwrap()
    .iter()
    .filter_map(|f| f["message"].as_str())
    .collect();
  assert_eq!(errors, vec!["declared feature folder missing: fct"]);

  let warnings: Vec<&str> = json["warnings"]
    .as_array()
    .unwrap()
    .iter()
    .filter_map(|f| f["message"].as_str())
    .collect();
  assert_eq!(
    warnings,
    vec!["config.json version (20240101) does not match directory name"]
  );
  Ok(())
}

#[test]
fn test_validate_all_visits_each_version_once() -> Result<()> {
  let reg = TestRegistry::new()?;
  let versions = ["20240101", "20240201", "20240301"];
  for version in versions {
    reg.add_release(version, &["fct"])?;
  }
  reg.write_index(
    &[("20240101", &["fct"]), ("20240201", &["fct"]), ("20240301", &["fct"])],
    None,
  )?;

  run_release_registry_ok(&reg.path, &["validate"])?;
  let report = reg.read_file("validation-report.md")?;
  for version in versions {
    let line = format!("- [{}] required file present: config.json", version);
    assert_eq!(report.matches(&line).count(), 1, "{}", report);
  }
  Ok(())
}

#[test]
fn test_loosely_typed_index_still_loads() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.add_release("20240101", &[])?;
  reg.write_file(
    "releases.json",
    r#"{"versions":[{"version":"20240101","createdAt":1704067200000,"updatedAt":null,"features":null}]}"#,
  )?;

  let output = run_release_registry_ok(&reg.path, &["validate", "--strict", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(json["summary"]["errors"], 0, "{}", json);
  assert_eq!(json["summary"]["warnings"], 0, "{}", json);
  Ok(())
}

#[test]
fn test_path_like_target_is_reported() -> Result<()> {
  let reg = TestRegistry::new()?;
  reg.write_index(&[], None)?;

  let output = run_release_registry_ok(&reg.path, &["validate", "../x"])?;
  assert!(stdout(&output).contains("- [../x] not a valid version name"));
  assert!(reg.read_file("validation-report.md")?.contains("- [../x] not a valid version name"));

  let strict = run_release_registry(&reg.path, &["validate", "../x", "--strict", "--no-report"])?;
  assert_eq!(strict.status.code(), Some(3));
  Ok(())
}
