//! Core engine for release-registry
//!
//! - **config**: registry.toml parsing and validation
//! - **context**: registry root, effective config and index, loaded once
//! - **engine**: version selection and the validation run
//! - **error**: error types with exit codes and help messages

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
