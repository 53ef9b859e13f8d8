//! CLI commands for release-registry
//!
//! - **validate**: run every rule, write the report, optionally fail the build
//! - **list**: show registered versions and whether they exist on disk
//! - **resolve**: turn `latest` (or a version) into a concrete version
//!
//! All commands accept `&RegistryContext` so the config and index load once.

pub mod list;
pub mod resolve;
pub mod validate;

pub use list::run_list;
pub use resolve::run_resolve;
pub use validate::run_validate;
