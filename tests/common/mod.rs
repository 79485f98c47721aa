//! Common test utilities and fixtures.
//!
//! Provides shared source-file fixtures and helpers to reduce duplication
//! across the test suite.

#![allow(dead_code)]

use std::path::Path;

use rodb::catalog::{self, CatalogSources, LoadReport, Snapshot};
use tempfile::TempDir;

// =============================================================================
// Source Fixtures
// =============================================================================

/// Usable items: two potions.
pub const ITEM_DB_USABLE: &str = r#"{
  "Body": [
    {
      "Id": 501,
      "AegisName": "Red_Potion",
      "Name": "Red Potion",
      "Type": "Healing",
      "Buy": 50,
      "Weight": 70
    },
    {
      "Id": 502,
      "AegisName": "Orange_Potion",
      "Name": "Orange Potion",
      "Type": "Healing",
      "Buy": 200,
      "Sell": 100,
      "Weight": 100
    }
  ]
}"#;

/// Equipment: a dagger and a body armor.
pub const ITEM_DB_EQUIP: &str = r#"{
  "Body": [
    {
      "Id": 1201,
      "AegisName": "Knife",
      "Name": "Knife",
      "Type": "Weapon",
      "SubType": "Dagger",
      "Buy": 50,
      "Weight": 40,
      "Attack": 17,
      "Slots": 3,
      "EquipLevelMin": 1,
      "Jobs": { "Novice": true, "Swordman": true, "Thief": true },
      "Locations": { "Right_Hand": true }
    },
    {
      "Id": 2301,
      "AegisName": "Cotton_Shirt",
      "Name": "Cotton Shirt",
      "Type": "Armor",
      "Buy": 10,
      "Weight": 10,
      "Defense": 1,
      "Jobs": { "All": true },
      "Locations": { "Armor": true }
    }
  ]
}"#;

/// Etc items: one loot drop.
pub const ITEM_DB_ETC: &str = r#"{
  "Body": [
    {
      "Id": 909,
      "AegisName": "Jellopy",
      "Name": "Jellopy",
      "Type": "Etc",
      "Buy": 6,
      "Weight": 10
    }
  ]
}"#;

/// Monsters: two field mobs and one MVP.
pub const MOB_DB: &str = r#"{
  "Body": [
    {
      "Id": 1002,
      "AegisName": "PORING",
      "Name": "Poring",
      "Level": 1,
      "Hp": 50,
      "BaseExp": 2,
      "JobExp": 1,
      "Attack": 7,
      "Defense": 0,
      "MagicDefense": 5,
      "Dex": 6,
      "Luk": 30,
      "Size": "Medium",
      "Race": "Plant",
      "Element": "Water",
      "ElementLevel": 1,
      "Drops": [
        { "Item": "Jellopy", "Rate": 7000 },
        { "Item": "Knife", "Rate": 100, "StealProtected": true },
        { "Item": "Unknown_Loot", "Rate": 50 }
      ]
    },
    {
      "Id": 1063,
      "AegisName": "LUNATIC",
      "Name": "Lunatic",
      "Level": 3,
      "Hp": 60,
      "Attack": 9,
      "Size": "Small",
      "Race": "Brute",
      "Element": "Neutral",
      "ElementLevel": 3
    },
    {
      "Id": 1038,
      "AegisName": "OSIRIS",
      "Name": "Osiris",
      "Level": 78,
      "Hp": 415400,
      "Attack": 2150,
      "Attack2": 2150,
      "Defense": 30,
      "MagicDefense": 25,
      "Size": "Medium",
      "Race": "Undead",
      "Element": "Undead",
      "ElementLevel": 4,
      "MvpExp": 45250,
      "MvpDrops": [
        { "Item": "Jellopy", "Rate": 10000 }
      ],
      "Drops": [
        { "Item": "Knife", "Rate": 1000 }
      ]
    }
  ]
}"#;

/// Client-info description table covering the red potion and the knife.
pub const ITEM_INFO: &str = r#"
tbl = {
    [501] = {
        unidentifiedDescriptionName = { "A mysterious potion." },
        identifiedDescriptionName = {
            "^000088Red Potion^000000",
            "A potion made from grinding Red Herbs.",
            "____________________",
        },
        slotCount = 0,
    },
    [1201] = {
        identifiedDescriptionName = {
            "A well-balanced dagger.",
            "ATK ^0000FF17^000000",
        },
        slotCount = 3,
    },
}
"#;

// =============================================================================
// Helpers
// =============================================================================

/// Write the standard fixtures into `dir` and return loader sources.
pub fn write_sources(dir: &Path) -> CatalogSources {
    write_file(dir, "item_db_usable.json", ITEM_DB_USABLE);
    write_file(dir, "item_db_equip.json", ITEM_DB_EQUIP);
    write_file(dir, "item_db_etc.json", ITEM_DB_ETC);
    write_file(dir, "mob_db.json", MOB_DB);
    write_file(dir, "itemInfo.lua", ITEM_INFO);

    CatalogSources {
        items: vec![
            dir.join("item_db_usable.json"),
            dir.join("item_db_equip.json"),
            dir.join("item_db_etc.json"),
        ],
        monsters: dir.join("mob_db.json"),
        descriptions: Some(dir.join("itemInfo.lua")),
    }
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

/// Load the standard fixture catalog.
pub fn load_fixture_catalog(dir: &TempDir) -> (Snapshot, LoadReport) {
    catalog::load(&write_sources(dir.path())).unwrap()
}

/// Ids of all fixture items, ascending.
pub const FIXTURE_ITEM_IDS: [u32; 5] = [501, 502, 909, 1201, 2301];

/// Ids of all fixture monsters, ascending.
pub const FIXTURE_MONSTER_IDS: [u32; 3] = [1002, 1038, 1063];

// =============================================================================
// Test Application (HTTP)
// =============================================================================

#[cfg(feature = "server")]
pub mod app {
    use axum_test::TestServer;
    use rodb::popularity::PopularityTracker;
    use rodb::server::{AppState, router};
    use tempfile::TempDir;

    /// A fixture catalog behind an in-process test server.
    pub struct TestApp {
        pub server: TestServer,
        pub tmp: TempDir,
    }

    impl TestApp {
        pub fn new() -> anyhow::Result<Self> {
            let tmp = TempDir::new()?;
            let (snapshot, _report) = super::load_fixture_catalog(&tmp);

            let images_dir = tmp.path().join("images");
            std::fs::create_dir_all(images_dir.join("item"))?;
            std::fs::create_dir_all(images_dir.join("collection"))?;

            let state = AppState::new(snapshot, PopularityTracker::in_memory(), images_dir);
            let server = TestServer::new(router(state))?;

            Ok(Self { server, tmp })
        }

        /// Path of the image cache directory.
        pub fn images_dir(&self) -> std::path::PathBuf {
            self.tmp.path().join("images")
        }
    }
}
