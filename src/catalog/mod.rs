//! In-memory catalog of item and monster records.
//!
//! The catalog is loaded once at startup from flat data sources into an
//! immutable [`Snapshot`] with O(1) id lookup and secondary indexes for
//! search and filter operations.

mod descriptions;
mod error;
mod item;
mod loader;
mod monster;
pub(crate) mod snapshot;

pub use error::LoadError;
pub use item::{Item, ItemStats};
pub use loader::{CatalogSources, LoadReport, load};
pub use monster::{Drop, Monster, MonsterStats};
pub use snapshot::Snapshot;
