//! Query service: the composition layer request handlers talk to.
//!
//! Owns shared handles to the immutable catalog snapshot and the popularity
//! tracker. Direct item lookups record a view; everything else delegates
//! with input normalization (trimming, case folding, pagination clamping).

use std::sync::Arc;

use crate::catalog::{Item, Monster, Snapshot};
use crate::logging;
use crate::popularity::{Period, PopularEntry, PopularityTracker, ViewStats};

/// A popularity ranking entry joined with its catalog record.
#[derive(Debug, Clone, Copy)]
pub struct PopularItem<'a> {
    pub item: &'a Item,
    pub view_count: u64,
}

/// Read-side API over the catalog and the popularity tracker.
#[derive(Clone)]
pub struct Query {
    snapshot: Arc<Snapshot>,
    tracker: Arc<PopularityTracker>,
}

impl Query {
    pub fn new(snapshot: Arc<Snapshot>, tracker: Arc<PopularityTracker>) -> Self {
        Self { snapshot, tracker }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn tracker(&self) -> &PopularityTracker {
        &self.tracker
    }

    /// Direct item lookup. Records a view and triggers best-effort
    /// persistence; a persistence failure degrades the tracker to
    /// in-memory operation, it never fails the lookup.
    pub fn item(&self, id: u32) -> Option<&Item> {
        let item = self.snapshot.item(id)?;
        self.record_item_view(id);
        Some(item)
    }

    /// Record one view of an item and trigger best-effort persistence.
    ///
    /// Does synchronous file I/O; async callers should run it on a
    /// blocking worker.
    pub fn record_item_view(&self, id: u32) {
        self.tracker.record_view(id);
        if let Err(err) = self.tracker.persist_if_dirty() {
            logging::error!(error = %err, "popularity state not persisted");
        }
    }

    /// Direct monster lookup. Monster views are not tracked.
    pub fn monster(&self, id: u32) -> Option<&Monster> {
        self.snapshot.monster(id)
    }

    /// Universal search: a numeric query is tried as an id first, then as
    /// a name substring. Does not record views.
    pub fn find_items(&self, query: &str, limit: usize) -> Vec<&Item> {
        let query = query.trim();
        if let Ok(id) = query.parse::<u32>() {
            if let Some(item) = self.snapshot.item(id) {
                return vec![item];
            }
        }
        let mut matches = self.snapshot.search_items(query, false);
        matches.truncate(limit);
        matches
    }

    pub fn search_items(&self, name: &str, exact: bool) -> Vec<&Item> {
        self.snapshot.search_items(name, exact)
    }

    pub fn search_monsters(&self, name: &str, exact: bool) -> Vec<&Monster> {
        self.snapshot.search_monsters(name, exact)
    }

    pub fn items_by_type(&self, item_type: &str) -> Vec<&Item> {
        self.snapshot.items_by_type(item_type)
    }

    pub fn monsters_by_element(&self, element: &str) -> Vec<&Monster> {
        self.snapshot.monsters_by_element(element)
    }

    pub fn mvp_monsters(&self) -> Vec<&Monster> {
        self.snapshot.mvp_monsters()
    }

    /// Page of items with clamped bounds: a negative offset reads from the
    /// start, a negative limit yields an empty page, a limit past the
    /// remainder yields the remainder.
    pub fn items_page(&self, offset: i64, limit: i64) -> (Vec<&Item>, usize) {
        let (offset, limit) = clamp_page(offset, limit);
        self.snapshot.items_page(offset, limit)
    }

    /// Page of monsters, same clamping as [`Self::items_page`].
    pub fn monsters_page(&self, offset: i64, limit: i64) -> (Vec<&Monster>, usize) {
        let (offset, limit) = clamp_page(offset, limit);
        self.snapshot.monsters_page(offset, limit)
    }

    /// View statistics for an item. All-zero for items never viewed.
    pub fn item_stats(&self, id: u32) -> ViewStats {
        self.tracker.stats(id)
    }

    /// Popularity ranking joined with catalog records. Entries whose item
    /// has disappeared from the catalog are dropped.
    pub fn popular_items(&self, period: Period, limit: Option<usize>) -> Vec<PopularItem<'_>> {
        self.tracker
            .popular(period, limit)
            .into_iter()
            .filter_map(|PopularEntry { item_id, view_count }| {
                self.snapshot.item(item_id).map(|item| PopularItem {
                    item,
                    view_count,
                })
            })
            .collect()
    }
}

fn clamp_page(offset: i64, limit: i64) -> (usize, usize) {
    (offset.max(0) as usize, limit.max(0) as usize)
}
