//! Item record types.

use serde::{Deserialize, Serialize};

/// Combat and handling stats attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStats {
    /// Attack power (weapons).
    pub attack: Option<i32>,
    /// Magic attack power.
    pub magic_attack: Option<i32>,
    /// Defense (armor).
    pub defense: Option<i32>,
    /// Weight in tenths.
    pub weight: i32,
    /// Number of card slots.
    pub slots: i32,
}

/// An item record from the database.
///
/// Immutable after load; the snapshot hands out shared references only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Internal (aegis) name, also used as the sprite reference.
    pub aegis_name: String,
    /// Description text, merged from the client-info supplement when
    /// available, otherwise a generated fallback. Never empty.
    pub description: String,
    /// Item kind (Weapon, Armor, Usable, Etc, ...).
    #[serde(rename = "type")]
    pub item_type: String,
    /// Item sub-kind (Dagger, Shield, ...), when the source provides one.
    pub subtype: Option<String>,
    /// NPC buy price in zeny.
    pub buy_price: i64,
    /// NPC sell price; defaults to half the buy price.
    pub sell_price: i64,
    pub stats: ItemStats,
    /// Minimum level required to equip.
    pub required_level: i32,
    /// Job classes that may use the item; `None` means all jobs.
    pub jobs: Option<Vec<String>>,
    /// Gender restriction, when any.
    pub gender: Option<String>,
    /// Equipment locations, joined with ", " when several apply.
    pub location: Option<String>,
    /// Script run on use/equip.
    pub script: Option<String>,
    pub equip_script: Option<String>,
    pub unequip_script: Option<String>,
    /// Stable URL for the item icon, keyed by item id.
    pub image_url: String,
    /// Stable URL for the collection (large) image, keyed by item id.
    pub collection_image_url: String,
}
