//! Monster record types.

use serde::{Deserialize, Serialize};

/// Monster base stats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterStats {
    pub hp: i64,
    pub sp: Option<i64>,
    pub base_exp: i64,
    pub job_exp: i64,
    pub attack: i32,
    pub attack2: Option<i32>,
    pub defense: i32,
    pub magic_defense: i32,
    #[serde(rename = "str")]
    pub strength: i32,
    #[serde(rename = "agi")]
    pub agility: i32,
    #[serde(rename = "vit")]
    pub vitality: i32,
    #[serde(rename = "int")]
    pub intelligence: i32,
    #[serde(rename = "dex")]
    pub dexterity: i32,
    #[serde(rename = "luk")]
    pub luck: i32,
}

/// A single drop table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drop {
    /// Resolved item id, when the dropped item exists in the catalog.
    /// Drops reference items by internal name in the source data.
    pub item_id: Option<u32>,
    /// Internal (aegis) name of the dropped item.
    pub item_name: String,
    /// Drop rate in percent (source rates are per ten-thousand).
    pub rate: f64,
    /// Whether the drop is protected from the Steal skill.
    pub steal_protected: bool,
}

/// A monster record from the database.
///
/// Immutable after load; the snapshot hands out shared references only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    /// Unique monster id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Internal (aegis) name, also used as the sprite reference.
    pub aegis_name: String,
    pub level: i32,
    /// Element type (Neutral, Water, Fire, ...).
    pub element: String,
    /// Element level (1-4).
    pub element_level: i32,
    /// Race (Formless, Undead, Brute, ...).
    pub race: String,
    /// Size class (Small, Medium, Large).
    pub size: String,
    pub stats: MonsterStats,
    /// Whether this is an MVP boss. Derived from the presence of MVP
    /// experience or MVP drops in the source record.
    pub mvp: bool,
    pub drops: Vec<Drop>,
    pub mvp_drops: Vec<Drop>,
}
