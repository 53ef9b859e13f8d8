//! `release-registry resolve`

use crate::core::context::RegistryContext;
use crate::core::error::RegistryResult;

/// Run the resolve command
///
/// Prints only the concrete version so the output can be captured by scripts.
pub fn run_resolve(ctx: &RegistryContext, version: &str) -> RegistryResult<()> {
  let index = ctx.require_index()?;
  let resolved = index.resolve(version)?;

  tracing::info!(requested = version, resolved = %resolved, "resolved version");
  println!("{}", resolved);
  Ok(())
}
