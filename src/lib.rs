//! Read-oriented game database: an immutable in-memory catalog of item and
//! monster records, plus a durable view-popularity tracker.
//!
//! The catalog is loaded once at startup from flat data sources into a
//! [`catalog::Snapshot`] (O(1) id lookup, secondary indexes, safe for
//! unlimited concurrent readers). The [`popularity::PopularityTracker`]
//! folds view events into per-day counters behind a single mutex and
//! persists them atomically to a JSON file. [`query::Query`] composes the
//! two for request handlers.
//!
//! # Quick Start
//!
//! ```ignore
//! use rodb::prelude::*;
//!
//! let sources = CatalogSources {
//!     items: vec!["data/item_db.json".into()],
//!     monsters: "data/mob_db.json".into(),
//!     descriptions: None,
//! };
//! let (snapshot, report) = rodb::catalog::load(&sources)?;
//! let tracker = PopularityTracker::load("data/popularity.json");
//! let query = Query::new(Arc::new(snapshot), Arc::new(tracker));
//!
//! let item = query.item(501); // records a view
//! let top = query.popular_items(Period::Today, Some(10));
//! ```
//!
//! # Feature Flags
//!
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `server` - Enable the HTTP API server and the `rodb-server` binary

pub mod catalog;
pub mod images;
mod logging;
pub mod popularity;
pub mod prelude;
pub mod query;
#[cfg(feature = "server")]
pub mod server;

// Re-export the core types at crate root for convenience
pub use catalog::{CatalogSources, Item, LoadError, LoadReport, Monster, Snapshot};
pub use popularity::{Period, PersistError, PopularEntry, PopularityTracker, ViewStats};
pub use query::Query;
