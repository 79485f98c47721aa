//! Catalog loading: parses the flat data sources into the snapshot.
//!
//! Sources are JSON exports of the upstream database format: a document
//! with a `Body` array of PascalCase records. Loading policy: a record
//! that fails validation (missing id/name, wrong field types) is skipped
//! with a warning and counted in the [`LoadReport`]; a file that cannot be
//! read or is not a valid source document is a fatal [`LoadError`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::images::{self, ImageKind};
use crate::logging;

use super::descriptions;
use super::error::LoadError;
use super::item::{Item, ItemStats};
use super::monster::{Drop, Monster, MonsterStats};
use super::snapshot::{Snapshot, SnapshotBuilder};

/// Paths to the catalog's data sources.
#[derive(Debug, Clone)]
pub struct CatalogSources {
    /// Item source files, one per item kind (usable/equip/etc).
    pub items: Vec<PathBuf>,
    /// Monster source file.
    pub monsters: PathBuf,
    /// Optional client-info description table (Lua format).
    pub descriptions: Option<PathBuf>,
}

/// Counters describing what one load pass did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub items_loaded: usize,
    pub monsters_loaded: usize,
    pub descriptions_loaded: usize,
    /// Item records skipped because they failed validation.
    pub items_skipped: usize,
    /// Monster records skipped because they failed validation.
    pub monsters_skipped: usize,
}

/// Build the snapshot from the given sources.
///
/// Items load before monsters so drop references can be resolved against
/// the item index. Every index is maintained while records are inserted;
/// there is no separate re-indexing phase.
pub fn load(sources: &CatalogSources) -> Result<(Snapshot, LoadReport), LoadError> {
    let mut report = LoadReport::default();
    let mut builder = SnapshotBuilder::new();

    let descriptions = match &sources.descriptions {
        Some(path) => load_descriptions(path),
        None => BTreeMap::new(),
    };
    report.descriptions_loaded = descriptions.len();

    for path in &sources.items {
        let document = read_source(path)?;
        logging::debug!(
            path = %path.display(),
            records = document.body.len(),
            "reading item source"
        );
        for raw in document.body {
            match serde_json::from_value::<RawItem>(raw) {
                Ok(raw_item) => {
                    builder.insert_item(raw_item.into_item(&descriptions));
                    report.items_loaded += 1;
                }
                Err(err) => {
                    report.items_skipped += 1;
                    logging::warn!(
                        path = %path.display(),
                        error = %err,
                        "skipping malformed item record"
                    );
                }
            }
        }
    }

    let document = read_source(&sources.monsters)?;
    for raw in document.body {
        match serde_json::from_value::<RawMonster>(raw) {
            Ok(raw_monster) => {
                let monster = raw_monster.into_monster(&builder);
                builder.insert_monster(monster);
                report.monsters_loaded += 1;
            }
            Err(err) => {
                report.monsters_skipped += 1;
                logging::warn!(
                    path = %sources.monsters.display(),
                    error = %err,
                    "skipping malformed monster record"
                );
            }
        }
    }

    logging::info!(
        items = report.items_loaded,
        monsters = report.monsters_loaded,
        descriptions = report.descriptions_loaded,
        items_skipped = report.items_skipped,
        monsters_skipped = report.monsters_skipped,
        "catalog loaded"
    );

    Ok((builder.finish(), report))
}

fn read_source(path: &Path) -> Result<SourceDocument, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::SourceMalformed {
        path: path.to_path_buf(),
        source,
    })
}

/// The description table is supplementary: a missing or unreadable file
/// degrades to empty descriptions instead of failing startup.
fn load_descriptions(path: &Path) -> BTreeMap<u32, String> {
    match std::fs::read_to_string(path) {
        Ok(content) => descriptions::parse(&content),
        Err(err) => {
            logging::warn!(
                path = %path.display(),
                error = %err,
                "description table unavailable, continuing without descriptions"
            );
            BTreeMap::new()
        }
    }
}

/// Top-level shape of every source file.
#[derive(Debug, Deserialize)]
struct SourceDocument {
    #[serde(rename = "Body", alias = "body")]
    body: Vec<serde_json::Value>,
}

/// Equipment locations appear either as a flag map or a plain string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLocations {
    Flags(BTreeMap<String, bool>),
    Text(String),
}

/// An item record as it appears in the source files. Only id and name are
/// required; everything else has upstream defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawItem {
    id: u32,
    name: String,
    #[serde(default)]
    aegis_name: String,
    #[serde(rename = "Type", default = "default_item_type")]
    item_type: String,
    sub_type: Option<String>,
    #[serde(default)]
    buy: i64,
    sell: Option<i64>,
    #[serde(default)]
    weight: i32,
    attack: Option<i32>,
    magic_attack: Option<i32>,
    defense: Option<i32>,
    #[serde(default)]
    slots: i32,
    #[serde(default)]
    equip_level_min: i32,
    jobs: Option<BTreeMap<String, bool>>,
    gender: Option<String>,
    locations: Option<RawLocations>,
    script: Option<String>,
    equip_script: Option<String>,
    un_equip_script: Option<String>,
}

fn default_item_type() -> String {
    "Etc".to_string()
}

impl RawItem {
    fn into_item(self, descriptions: &BTreeMap<u32, String>) -> Item {
        let description = descriptions
            .get(&self.id)
            .cloned()
            .unwrap_or_else(|| format!("{} - {}", self.aegis_name, self.item_type));

        let jobs = self.jobs.and_then(|flags| {
            if flags.get("All").copied().unwrap_or(false) {
                return None;
            }
            let enabled: Vec<String> = flags
                .into_iter()
                .filter_map(|(job, allowed)| allowed.then_some(job))
                .collect();
            if enabled.is_empty() { None } else { Some(enabled) }
        });

        let location = self.locations.and_then(|locations| match locations {
            RawLocations::Text(text) => Some(text),
            RawLocations::Flags(flags) => {
                let enabled: Vec<String> = flags
                    .into_iter()
                    .filter_map(|(loc, on)| on.then_some(loc))
                    .collect();
                if enabled.is_empty() {
                    None
                } else {
                    Some(enabled.join(", "))
                }
            }
        });

        Item {
            id: self.id,
            name: self.name,
            description,
            subtype: self.sub_type,
            buy_price: self.buy,
            sell_price: self.sell.unwrap_or(self.buy / 2),
            stats: ItemStats {
                attack: self.attack,
                magic_attack: self.magic_attack,
                defense: self.defense,
                weight: self.weight,
                slots: self.slots,
            },
            required_level: self.equip_level_min,
            jobs,
            gender: self.gender,
            location,
            script: self.script,
            equip_script: self.equip_script,
            unequip_script: self.un_equip_script,
            image_url: images::image_url(ImageKind::Item, self.id),
            collection_image_url: images::image_url(ImageKind::Collection, self.id),
            aegis_name: self.aegis_name,
            item_type: self.item_type,
        }
    }
}

/// A drop entry as it appears in the source files. Rates are per
/// ten-thousand.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDrop {
    item: String,
    #[serde(default = "default_drop_rate")]
    rate: i64,
    #[serde(default)]
    steal_protected: bool,
}

fn default_drop_rate() -> i64 {
    1
}

impl RawDrop {
    fn into_drop(self, builder: &SnapshotBuilder) -> Drop {
        Drop {
            item_id: builder.resolve_item_name(&self.item),
            rate: self.rate as f64 / 100.0,
            item_name: self.item,
            steal_protected: self.steal_protected,
        }
    }
}

/// A monster record as it appears in the source files.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMonster {
    id: u32,
    name: String,
    #[serde(default)]
    aegis_name: String,
    #[serde(default = "default_one")]
    level: i32,
    #[serde(default = "default_element")]
    element: String,
    #[serde(default = "default_one")]
    element_level: i32,
    #[serde(default = "default_race")]
    race: String,
    #[serde(default = "default_size")]
    size: String,
    #[serde(default = "default_hp")]
    hp: i64,
    sp: Option<i64>,
    #[serde(default)]
    base_exp: i64,
    #[serde(default)]
    job_exp: i64,
    #[serde(default)]
    attack: i32,
    attack2: Option<i32>,
    #[serde(default)]
    defense: i32,
    #[serde(default)]
    magic_defense: i32,
    #[serde(rename = "Str", default = "default_one")]
    strength: i32,
    #[serde(rename = "Agi", default = "default_one")]
    agility: i32,
    #[serde(rename = "Vit", default = "default_one")]
    vitality: i32,
    #[serde(rename = "Int", default = "default_one")]
    intelligence: i32,
    #[serde(rename = "Dex", default = "default_one")]
    dexterity: i32,
    #[serde(rename = "Luk", default = "default_one")]
    luck: i32,
    #[serde(default)]
    mvp_exp: i64,
    #[serde(default)]
    drops: Vec<RawDrop>,
    #[serde(default)]
    mvp_drops: Vec<RawDrop>,
}

fn default_one() -> i32 {
    1
}

fn default_hp() -> i64 {
    1
}

fn default_element() -> String {
    "Neutral".to_string()
}

fn default_race() -> String {
    "Formless".to_string()
}

fn default_size() -> String {
    "Small".to_string()
}

impl RawMonster {
    fn into_monster(self, builder: &SnapshotBuilder) -> Monster {
        // MVP status is not a flag in the source data; it is implied by
        // MVP experience or an MVP drop table.
        let mvp = self.mvp_exp > 0 || !self.mvp_drops.is_empty();

        Monster {
            id: self.id,
            name: self.name,
            aegis_name: self.aegis_name,
            level: self.level,
            element: self.element,
            element_level: self.element_level,
            race: self.race,
            size: self.size,
            stats: MonsterStats {
                hp: self.hp,
                sp: self.sp,
                base_exp: self.base_exp,
                job_exp: self.job_exp,
                attack: self.attack,
                attack2: self.attack2,
                defense: self.defense,
                magic_defense: self.magic_defense,
                strength: self.strength,
                agility: self.agility,
                vitality: self.vitality,
                intelligence: self.intelligence,
                dexterity: self.dexterity,
                luck: self.luck,
            },
            mvp,
            drops: self
                .drops
                .into_iter()
                .map(|drop| drop.into_drop(builder))
                .collect(),
            mvp_drops: self
                .mvp_drops
                .into_iter()
                .map(|drop| drop.into_drop(builder))
                .collect(),
        }
    }
}
