//! The immutable in-memory catalog snapshot.
//!
//! Built exactly once at startup by the loader and shared read-only for the
//! process lifetime, so every operation here is safe for unlimited
//! concurrent readers without locking.

use std::collections::{BTreeSet, HashMap};

use super::item::Item;
use super::monster::Monster;

/// The complete in-memory dataset: id maps plus the secondary indexes
/// needed by search and filter operations.
///
/// Id lookup is O(1); ordered traversals (pagination, search results) go
/// through sorted id lists so result order is stable across processes.
#[derive(Debug)]
pub struct Snapshot {
    items: HashMap<u32, Item>,
    monsters: HashMap<u32, Monster>,
    /// Item ids in ascending order.
    item_order: Vec<u32>,
    /// Monster ids in ascending order.
    monster_order: Vec<u32>,
    /// Lowercased item type -> ids.
    items_by_type: HashMap<String, BTreeSet<u32>>,
    /// Lowercased element -> ids.
    monsters_by_element: HashMap<String, BTreeSet<u32>>,
    /// Ids of MVP bosses.
    mvp_ids: BTreeSet<u32>,
}

impl Snapshot {
    /// Look up an item by id.
    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Look up a monster by id.
    pub fn monster(&self, id: u32) -> Option<&Monster> {
        self.monsters.get(&id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn monster_count(&self) -> usize {
        self.monsters.len()
    }

    /// Search items by name. Exact mode is case-insensitive full-name
    /// equality; fuzzy mode is case-insensitive substring containment.
    /// Results come back in ascending id order.
    pub fn search_items(&self, query: &str, exact: bool) -> Vec<&Item> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.items_ordered()
            .filter(|item| name_matches(&item.name, &needle, exact))
            .collect()
    }

    /// Search monsters by name, same matching rules as [`Self::search_items`].
    pub fn search_monsters(&self, query: &str, exact: bool) -> Vec<&Monster> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.monsters_ordered()
            .filter(|monster| name_matches(&monster.name, &needle, exact))
            .collect()
    }

    /// All items of the given type (case-insensitive), ascending id order.
    pub fn items_by_type(&self, item_type: &str) -> Vec<&Item> {
        let key = item_type.trim().to_lowercase();
        self.items_by_type
            .get(&key)
            .map(|ids| self.collect_items(ids))
            .unwrap_or_default()
    }

    /// All monsters of the given element (case-insensitive), ascending id order.
    pub fn monsters_by_element(&self, element: &str) -> Vec<&Monster> {
        let key = element.trim().to_lowercase();
        self.monsters_by_element
            .get(&key)
            .map(|ids| self.collect_monsters(ids))
            .unwrap_or_default()
    }

    /// All MVP bosses, ascending id order.
    pub fn mvp_monsters(&self) -> Vec<&Monster> {
        self.collect_monsters(&self.mvp_ids)
    }

    /// A stable page of items plus the total item count.
    ///
    /// An offset past the end yields an empty page; a limit past the
    /// remainder yields the remainder.
    pub fn items_page(&self, offset: usize, limit: usize) -> (Vec<&Item>, usize) {
        let page = self.items_ordered().skip(offset).take(limit).collect();
        (page, self.items.len())
    }

    /// A stable page of monsters plus the total monster count.
    pub fn monsters_page(&self, offset: usize, limit: usize) -> (Vec<&Monster>, usize) {
        let page = self.monsters_ordered().skip(offset).take(limit).collect();
        (page, self.monsters.len())
    }

    /// All item ids in ascending order.
    pub fn item_ids(&self) -> &[u32] {
        &self.item_order
    }

    fn items_ordered(&self) -> impl Iterator<Item = &Item> {
        self.item_order.iter().filter_map(|id| self.items.get(id))
    }

    fn monsters_ordered(&self) -> impl Iterator<Item = &Monster> {
        self.monster_order
            .iter()
            .filter_map(|id| self.monsters.get(id))
    }

    fn collect_items(&self, ids: &BTreeSet<u32>) -> Vec<&Item> {
        ids.iter().filter_map(|id| self.items.get(id)).collect()
    }

    fn collect_monsters(&self, ids: &BTreeSet<u32>) -> Vec<&Monster> {
        ids.iter().filter_map(|id| self.monsters.get(id)).collect()
    }
}

fn name_matches(name: &str, needle_lower: &str, exact: bool) -> bool {
    let name_lower = name.to_lowercase();
    if exact {
        name_lower == needle_lower
    } else {
        name_lower.contains(needle_lower)
    }
}

/// Accumulates records and keeps every index in sync as they arrive, so the
/// whole build is a single pass over the sources. Publishing happens by
/// value through [`SnapshotBuilder::finish`]; no reader can observe a
/// half-built snapshot.
pub(crate) struct SnapshotBuilder {
    items: HashMap<u32, Item>,
    monsters: HashMap<u32, Monster>,
    item_ids: BTreeSet<u32>,
    monster_ids: BTreeSet<u32>,
    items_by_type: HashMap<String, BTreeSet<u32>>,
    monsters_by_element: HashMap<String, BTreeSet<u32>>,
    mvp_ids: BTreeSet<u32>,
    /// Lowercased aegis name -> item id, used to resolve drop references.
    aegis_index: HashMap<String, u32>,
}

impl SnapshotBuilder {
    pub(crate) fn new() -> Self {
        Self {
            items: HashMap::new(),
            monsters: HashMap::new(),
            item_ids: BTreeSet::new(),
            monster_ids: BTreeSet::new(),
            items_by_type: HashMap::new(),
            monsters_by_element: HashMap::new(),
            mvp_ids: BTreeSet::new(),
            aegis_index: HashMap::new(),
        }
    }

    /// Insert an item, updating the id map and every secondary index.
    /// A duplicate id replaces the earlier record (later sources win),
    /// including its entries in the secondary indexes.
    pub(crate) fn insert_item(&mut self, item: Item) {
        if let Some(previous) = self.items.remove(&item.id) {
            self.unindex_item(&previous);
        }
        self.item_ids.insert(item.id);
        self.items_by_type
            .entry(item.item_type.to_lowercase())
            .or_default()
            .insert(item.id);
        if !item.aegis_name.is_empty() {
            self.aegis_index
                .insert(item.aegis_name.to_lowercase(), item.id);
        }
        self.items.insert(item.id, item);
    }

    fn unindex_item(&mut self, item: &Item) {
        let type_key = item.item_type.to_lowercase();
        if let Some(ids) = self.items_by_type.get_mut(&type_key) {
            ids.remove(&item.id);
            if ids.is_empty() {
                self.items_by_type.remove(&type_key);
            }
        }
        let aegis_key = item.aegis_name.to_lowercase();
        if self.aegis_index.get(&aegis_key) == Some(&item.id) {
            self.aegis_index.remove(&aegis_key);
        }
    }

    /// Insert a monster, updating the id map and every secondary index.
    /// Duplicate ids follow the same replacement rule as items.
    pub(crate) fn insert_monster(&mut self, monster: Monster) {
        if let Some(previous) = self.monsters.remove(&monster.id) {
            let element_key = previous.element.to_lowercase();
            if let Some(ids) = self.monsters_by_element.get_mut(&element_key) {
                ids.remove(&previous.id);
                if ids.is_empty() {
                    self.monsters_by_element.remove(&element_key);
                }
            }
            self.mvp_ids.remove(&previous.id);
        }
        self.monster_ids.insert(monster.id);
        self.monsters_by_element
            .entry(monster.element.to_lowercase())
            .or_default()
            .insert(monster.id);
        if monster.mvp {
            self.mvp_ids.insert(monster.id);
        }
        self.monsters.insert(monster.id, monster);
    }

    /// Resolve an item's internal name to its id, for drop references.
    pub(crate) fn resolve_item_name(&self, aegis_name: &str) -> Option<u32> {
        self.aegis_index.get(&aegis_name.to_lowercase()).copied()
    }

    pub(crate) fn finish(self) -> Snapshot {
        Snapshot {
            items: self.items,
            monsters: self.monsters,
            item_order: self.item_ids.into_iter().collect(),
            monster_order: self.monster_ids.into_iter().collect(),
            items_by_type: self.items_by_type,
            monsters_by_element: self.monsters_by_element,
            mvp_ids: self.mvp_ids,
        }
    }
}
