//! Convenient re-exports for common usage patterns.

pub use crate::catalog::{
    CatalogSources, Drop, Item, ItemStats, LoadError, LoadReport, Monster, MonsterStats, Snapshot,
};
pub use crate::images::ImageKind;
pub use crate::popularity::{
    ParsePeriodError, Period, PersistError, PopularEntry, PopularityTracker, ViewHistory,
    ViewStats,
};
pub use crate::query::{PopularItem, Query};
