//! Validation results and their rendered forms
//!
//! - **aggregator**: `ValidationResult`, findings bucketed by severity
//! - **render**: markdown and JSON reports

mod aggregator;
mod render;

pub use aggregator::ValidationResult;
pub use render::{render_json, render_markdown};
