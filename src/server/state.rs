//! Application state management.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{self, LoadError, Snapshot};
use crate::popularity::PopularityTracker;
use crate::query::Query;

use super::config::Config;

/// How many days of popularity history survive a restart.
const POPULARITY_RETENTION_DAYS: u64 = 90;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Query service over the catalog snapshot and popularity tracker.
    pub query: Query,
    /// Image cache directory.
    pub images_dir: Arc<PathBuf>,
}

impl AppState {
    /// Build the state from configuration: load the catalog (fatal on
    /// source errors), restore and prune the popularity tracker.
    pub fn from_config(config: &Config) -> Result<Self, StateError> {
        let (snapshot, report) = catalog::load(&config.data.sources())?;
        tracing::info!(
            items = report.items_loaded,
            monsters = report.monsters_loaded,
            skipped = report.items_skipped + report.monsters_skipped,
            "catalog snapshot ready"
        );

        let tracker = PopularityTracker::load(&config.data.popularity_file);
        tracker.prune(POPULARITY_RETENTION_DAYS);

        Ok(Self::new(
            snapshot,
            tracker,
            config.data.images_dir.clone(),
        ))
    }

    /// Build the state from already-constructed parts. Used by tests.
    pub fn new(snapshot: Snapshot, tracker: PopularityTracker, images_dir: PathBuf) -> Self {
        Self {
            query: Query::new(Arc::new(snapshot), Arc::new(tracker)),
            images_dir: Arc::new(images_dir),
        }
    }
}

/// Errors that can occur when setting up application state.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("failed to load catalog: {0}")]
    Catalog(#[from] LoadError),
}
