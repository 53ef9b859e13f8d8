//! Release validation rules
//!
//! All per-version rules implement the `Rule` trait and are registered, in
//! execution order, by `create_default_rule_set()`. Adding a rule never
//! touches the run driver.
//!
//! # Built-in Rules
//!
//! - **required-files**: config.json, release.md and review.md exist
//! - **config-structure**: config.json parses and has the required fields
//! - **feature-folders**: declared features have folders with test.md
//! - **markdown-content**: documents are filled in and mention the version
//! - **traceability**: release.md carries a populated changelog
//! - **index-consistency**: version is registered with matching features
//! - **latest-mirror**: the `latest` directory agrees with the index pointer
//!
//! Registry-wide checks (orphaned index entries, duplicates, dangling latest
//! pointer) live in `global` and run once per validation run.
//!
//! # Example
//!
//! ```rust,ignore
//! use release_registry::checks::{RuleContext, create_default_rule_set};
//!
//! let rules = create_default_rule_set();
//! let findings = rules.run_all(&RuleContext {
//!   release: &store.dir("20240101"),
//!   index: &index,
//!   rules: &config.rules,
//! });
//! ```

mod config_structure;
mod feature_folders;
mod global;
mod index_consistency;
mod latest_mirror;
mod markdown_content;
mod required_files;
mod runner;
mod trait_def;
mod traceability;

pub use global::{GLOBAL_SCOPE, run_global_checks};
pub use runner::{RuleSet, create_default_rule_set};
pub use trait_def::{Finding, RuleContext, Severity};
