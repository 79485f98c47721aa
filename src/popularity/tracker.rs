//! Durable, concurrency-safe view counting with day-bucket aggregation.
//!
//! Every view is folded into a per-item, per-calendar-day counter behind a
//! single mutex. Persistence snapshots the map under the lock and writes
//! outside it, replacing the file atomically so a crash mid-write can never
//! leave a truncated document on disk.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::logging;

use super::period::Period;

/// Per-item view counts keyed by calendar day.
pub type DayCounts = BTreeMap<NaiveDate, u64>;

/// The full tracker state: item id -> day -> count. This is also the shape
/// of the persisted JSON document (`{"501": {"2026-08-26": 3}}`).
pub type ViewHistory = BTreeMap<u32, DayCounts>;

/// View statistics for one item across all report windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewStats {
    pub today: u64,
    pub yesterday: u64,
    #[serde(rename = "last7days")]
    pub last7_days: u64,
    #[serde(rename = "last30days")]
    pub last30_days: u64,
    pub all_time: u64,
}

/// One entry of a popularity ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopularEntry {
    pub item_id: u32,
    pub view_count: u64,
}

/// Failure to write the popularity file. Non-fatal: the tracker keeps
/// counting in memory and retries on the next persistence trigger.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("failed to serialize popularity state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write popularity file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

struct TrackerState {
    views: ViewHistory,
    dirty: bool,
}

/// View-popularity tracker.
///
/// The single mutable shared resource in the system: all reads and writes
/// pass through one mutex guarding the whole day map.
pub struct PopularityTracker {
    state: Mutex<TrackerState>,
    path: Option<PathBuf>,
}

impl PopularityTracker {
    /// A tracker without durable storage. Used in tests and by callers
    /// that accept losing counts on shutdown; persistence is a no-op.
    pub fn in_memory() -> Self {
        Self::with_state(ViewHistory::new(), None)
    }

    /// Restore a tracker from the popularity file.
    ///
    /// A missing file is a fresh start. A present-but-unreadable or corrupt
    /// file is logged and falls back to empty state; popularity data is
    /// never worth blocking startup over.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let views = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<ViewHistory>(&content) {
                Ok(views) => {
                    logging::info!(
                        path = %path.display(),
                        items = views.len(),
                        "restored popularity state"
                    );
                    views
                }
                Err(err) => {
                    logging::warn!(
                        path = %path.display(),
                        error = %err,
                        "popularity file is corrupt, starting with empty state"
                    );
                    ViewHistory::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                logging::info!(path = %path.display(), "no popularity file, starting fresh");
                ViewHistory::new()
            }
            Err(err) => {
                logging::warn!(
                    path = %path.display(),
                    error = %err,
                    "popularity file unreadable, starting with empty state"
                );
                ViewHistory::new()
            }
        };
        Self::with_state(views, Some(path))
    }

    fn with_state(views: ViewHistory, path: Option<PathBuf>) -> Self {
        Self {
            state: Mutex::new(TrackerState { views, dirty: false }),
            path,
        }
    }

    /// Record one view of `item_id` for today.
    pub fn record_view(&self, item_id: u32) {
        self.record_view_on(item_id, today());
    }

    /// Record one view of `item_id` for a specific day.
    pub fn record_view_on(&self, item_id: u32, day: NaiveDate) {
        let mut state = self.lock();
        let bucket = state.views.entry(item_id).or_default().entry(day).or_insert(0);
        *bucket += 1;
        state.dirty = true;
    }

    /// View statistics for `item_id` across all report windows, relative
    /// to the current day. Items never viewed yield all-zero stats.
    pub fn stats(&self, item_id: u32) -> ViewStats {
        self.stats_on(item_id, today())
    }

    /// View statistics relative to an explicit `today`.
    pub fn stats_on(&self, item_id: u32, today: NaiveDate) -> ViewStats {
        let state = self.lock();
        let Some(days) = state.views.get(&item_id) else {
            return ViewStats::default();
        };
        ViewStats {
            today: sum_window(days, Period::Today.range(today)),
            yesterday: sum_window(days, Period::Yesterday.range(today)),
            last7_days: sum_window(days, Period::Last7Days.range(today)),
            last30_days: sum_window(days, Period::Last30Days.range(today)),
            all_time: days.values().sum(),
        }
    }

    /// The most viewed items within `period`, relative to the current day.
    pub fn popular(&self, period: Period, limit: Option<usize>) -> Vec<PopularEntry> {
        self.popular_on(period, limit, today())
    }

    /// Popularity ranking relative to an explicit `today`.
    ///
    /// Ordered by descending view count, ties broken by ascending item id.
    /// Items with no views inside the window are excluded. `limit: None`
    /// returns the full ranking.
    pub fn popular_on(
        &self,
        period: Period,
        limit: Option<usize>,
        today: NaiveDate,
    ) -> Vec<PopularEntry> {
        let window = period.range(today);
        let mut ranking: Vec<PopularEntry> = {
            let state = self.lock();
            state
                .views
                .iter()
                .filter_map(|(&item_id, days)| {
                    let view_count = sum_window(days, window);
                    (view_count > 0).then_some(PopularEntry {
                        item_id,
                        view_count,
                    })
                })
                .collect()
        };

        ranking.sort_by(|a, b| {
            b.view_count
                .cmp(&a.view_count)
                .then(a.item_id.cmp(&b.item_id))
        });
        if let Some(limit) = limit {
            ranking.truncate(limit);
        }
        ranking
    }

    /// Drop day buckets older than `days_to_keep` days (relative to today)
    /// and items left with no buckets. Bounds on-disk and in-memory growth.
    pub fn prune(&self, days_to_keep: u64) {
        let cutoff = today()
            .checked_sub_days(chrono::Days::new(days_to_keep))
            .unwrap_or(NaiveDate::MIN);
        let mut state = self.lock();
        let before: usize = state.views.values().map(BTreeMap::len).sum();
        for days in state.views.values_mut() {
            days.retain(|day, _| *day >= cutoff);
        }
        state.views.retain(|_, days| !days.is_empty());
        let after: usize = state.views.values().map(BTreeMap::len).sum();
        if after != before {
            state.dirty = true;
            logging::info!(removed = before - after, "pruned old popularity buckets");
        }
    }

    /// Serialize the full state to the popularity file.
    ///
    /// The state is copied under the lock and written outside it, to a
    /// temporary file that atomically replaces the target.
    pub fn persist(&self) -> Result<(), PersistError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let views = {
            let mut state = self.lock();
            state.dirty = false;
            state.views.clone()
        };

        match write_atomically(path, &views) {
            Ok(()) => Ok(()),
            Err(err) => {
                // Keep the unpersisted counts marked for the next attempt.
                self.lock().dirty = true;
                Err(err)
            }
        }
    }

    /// Persist only when there are unpersisted mutations.
    pub fn persist_if_dirty(&self) -> Result<(), PersistError> {
        if self.lock().dirty { self.persist() } else { Ok(()) }
    }

    /// A copy of the full view history. Mainly useful for inspection and
    /// round-trip tests.
    pub fn view_history(&self) -> ViewHistory {
        self.lock().views.clone()
    }

    /// Ids of every tracked item.
    pub fn tracked_items(&self) -> Vec<u32> {
        self.lock().views.keys().copied().collect()
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        // A poisoned lock only means another thread panicked mid-update;
        // counters are still structurally valid, so keep serving.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn sum_window(days: &DayCounts, (start, end): (NaiveDate, NaiveDate)) -> u64 {
    days.range(start..=end).map(|(_, count)| count).sum()
}

fn write_atomically(path: &Path, views: &ViewHistory) -> Result<(), PersistError> {
    let document = serde_json::to_vec_pretty(views)?;

    let io_err = |source: std::io::Error| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&document).map_err(io_err)?;
    tmp.persist(path).map_err(|err| io_err(err.error))?;

    Ok(())
}
