//! Registry data model
//!
//! - **index**: the central `releases.json` document
//! - **release**: version directories, their `config.json` and the store that holds them
//!
//! Everything here is read-only: the validation engine never writes to the store.

pub mod index;
pub mod release;

pub use index::{LatestPointer, RegistryIndex};
pub use release::{ConfigLoad, LATEST_VERSION, ReleaseDir, ReleaseStore};
