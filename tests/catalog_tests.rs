//! Integration tests for catalog loading and snapshot queries.

mod common;

use common::{FIXTURE_ITEM_IDS, FIXTURE_MONSTER_IDS, load_fixture_catalog, write_file};
use rodb::catalog::{self, CatalogSources, LoadError};
use tempfile::TempDir;

// =============================================================================
// Loading Policy Tests
// =============================================================================

#[test]
fn test_loads_all_fixture_records() {
    let tmp = TempDir::new().unwrap();
    let (snapshot, report) = load_fixture_catalog(&tmp);

    assert_eq!(report.items_loaded, 5);
    assert_eq!(report.monsters_loaded, 3);
    assert_eq!(report.items_skipped, 0);
    assert_eq!(report.monsters_skipped, 0);
    assert_eq!(snapshot.item_count(), 5);
    assert_eq!(snapshot.monster_count(), 3);
}

#[test]
fn test_malformed_records_are_skipped_not_fatal() {
    let tmp = TempDir::new().unwrap();
    // One good record, one missing Name, one with a non-numeric id.
    write_file(
        tmp.path(),
        "items.json",
        r#"{
  "Body": [
    { "Id": 501, "Name": "Red Potion", "Type": "Healing" },
    { "Id": 502, "Type": "Healing" },
    { "Id": "many", "Name": "Broken" }
  ]
}"#,
    );
    write_file(tmp.path(), "mobs.json", r#"{ "Body": [] }"#);

    let sources = CatalogSources {
        items: vec![tmp.path().join("items.json")],
        monsters: tmp.path().join("mobs.json"),
        descriptions: None,
    };
    let (snapshot, report) = catalog::load(&sources).unwrap();

    assert_eq!(report.items_loaded, 1);
    assert_eq!(report.items_skipped, 2);
    assert!(snapshot.item(501).is_some());
    assert!(snapshot.item(502).is_none());
}

#[test]
fn test_duplicate_item_id_later_source_wins_and_reindexes() {
    let tmp = TempDir::new().unwrap();
    write_file(
        tmp.path(),
        "items_base.json",
        r#"{
  "Body": [
    { "Id": 501, "AegisName": "Red_Potion", "Name": "Red Potion", "Type": "Healing" }
  ]
}"#,
    );
    write_file(
        tmp.path(),
        "items_override.json",
        r#"{
  "Body": [
    { "Id": 501, "AegisName": "Crimson_Blade", "Name": "Crimson Blade", "Type": "Weapon" }
  ]
}"#,
    );
    // The drop reference uses the replaced internal name, which must no
    // longer resolve.
    write_file(
        tmp.path(),
        "mobs.json",
        r#"{
  "Body": [
    {
      "Id": 1002,
      "Name": "Poring",
      "Drops": [
        { "Item": "Red_Potion", "Rate": 7000 },
        { "Item": "Crimson_Blade", "Rate": 100 }
      ]
    }
  ]
}"#,
    );

    let sources = CatalogSources {
        items: vec![
            tmp.path().join("items_base.json"),
            tmp.path().join("items_override.json"),
        ],
        monsters: tmp.path().join("mobs.json"),
        descriptions: None,
    };
    let (snapshot, report) = catalog::load(&sources).unwrap();

    assert_eq!(report.items_loaded, 2);
    assert_eq!(snapshot.item_count(), 1);
    assert_eq!(snapshot.item(501).unwrap().name, "Crimson Blade");

    // The classification index follows the replacement.
    assert!(snapshot.items_by_type("healing").is_empty());
    let weapon_ids: Vec<u32> = snapshot
        .items_by_type("weapon")
        .iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(weapon_ids, vec![501]);

    // So does the internal-name index used for drop resolution.
    let monster = snapshot.monster(1002).unwrap();
    assert_eq!(monster.drops[0].item_id, None);
    assert_eq!(monster.drops[1].item_id, Some(501));
}

#[test]
fn test_duplicate_monster_id_later_record_wins_and_reindexes() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "items.json", r#"{ "Body": [] }"#);
    write_file(
        tmp.path(),
        "mobs.json",
        r#"{
  "Body": [
    { "Id": 1002, "Name": "Poring", "Element": "Water", "MvpExp": 100 },
    { "Id": 1002, "Name": "Angeling", "Element": "Holy" }
  ]
}"#,
    );

    let sources = CatalogSources {
        items: vec![tmp.path().join("items.json")],
        monsters: tmp.path().join("mobs.json"),
        descriptions: None,
    };
    let (snapshot, _report) = catalog::load(&sources).unwrap();

    assert_eq!(snapshot.monster_count(), 1);
    assert_eq!(snapshot.monster(1002).unwrap().name, "Angeling");
    assert!(snapshot.monsters_by_element("water").is_empty());
    assert_eq!(snapshot.monsters_by_element("holy").len(), 1);
    assert!(snapshot.mvp_monsters().is_empty());
}

#[test]
fn test_missing_source_file_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let sources = CatalogSources {
        items: vec![tmp.path().join("does_not_exist.json")],
        monsters: tmp.path().join("mobs.json"),
        descriptions: None,
    };

    let err = catalog::load(&sources).unwrap_err();
    assert!(matches!(err, LoadError::SourceUnreadable { .. }));
}

#[test]
fn test_unparseable_source_file_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "items.json", "Body:\n  - not json at all");
    let sources = CatalogSources {
        items: vec![tmp.path().join("items.json")],
        monsters: tmp.path().join("mobs.json"),
        descriptions: None,
    };

    let err = catalog::load(&sources).unwrap_err();
    assert!(matches!(err, LoadError::SourceMalformed { .. }));
}

#[test]
fn test_source_without_body_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "items.json", r#"{ "Header": {} }"#);
    write_file(tmp.path(), "mobs.json", r#"{ "Body": [] }"#);
    let sources = CatalogSources {
        items: vec![tmp.path().join("items.json")],
        monsters: tmp.path().join("mobs.json"),
        descriptions: None,
    };

    assert!(matches!(
        catalog::load(&sources).unwrap_err(),
        LoadError::SourceMalformed { .. }
    ));
}

#[test]
fn test_missing_description_table_is_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let mut sources = common::write_sources(tmp.path());
    sources.descriptions = Some(tmp.path().join("missing.lua"));

    let (snapshot, report) = catalog::load(&sources).unwrap();
    assert_eq!(report.descriptions_loaded, 0);
    // Falls back to the generated description.
    assert_eq!(snapshot.item(501).unwrap().description, "Red_Potion - Healing");
}

// =============================================================================
// Record Field Tests
// =============================================================================

#[test]
fn test_item_fields_and_defaults() {
    let tmp = TempDir::new().unwrap();
    let (snapshot, _) = load_fixture_catalog(&tmp);

    let knife = snapshot.item(1201).unwrap();
    assert_eq!(knife.name, "Knife");
    assert_eq!(knife.item_type, "Weapon");
    assert_eq!(knife.subtype.as_deref(), Some("Dagger"));
    assert_eq!(knife.stats.attack, Some(17));
    assert_eq!(knife.stats.slots, 3);
    assert_eq!(knife.required_level, 1);
    assert_eq!(knife.location.as_deref(), Some("Right_Hand"));
    let jobs = knife.jobs.as_ref().unwrap();
    assert!(jobs.contains(&"Thief".to_string()));

    // Sell price defaults to half the buy price.
    let red = snapshot.item(501).unwrap();
    assert_eq!(red.buy_price, 50);
    assert_eq!(red.sell_price, 25);

    // Explicit sell price wins.
    assert_eq!(snapshot.item(502).unwrap().sell_price, 100);

    // "All" jobs collapses to None.
    assert!(snapshot.item(2301).unwrap().jobs.is_none());
}

#[test]
fn test_image_references_are_keyed_by_id() {
    let tmp = TempDir::new().unwrap();
    let (snapshot, _) = load_fixture_catalog(&tmp);

    let knife = snapshot.item(1201).unwrap();
    assert_eq!(knife.image_url, "/api/v1/items/images/item/1201.png");
    assert_eq!(
        knife.collection_image_url,
        "/api/v1/items/images/collection/1201.png"
    );
}

#[test]
fn test_descriptions_merge_with_fallback() {
    let tmp = TempDir::new().unwrap();
    let (snapshot, report) = load_fixture_catalog(&tmp);

    assert_eq!(report.descriptions_loaded, 2);

    // Merged from the client-info table, color codes stripped.
    let red = snapshot.item(501).unwrap();
    assert_eq!(
        red.description,
        "Red Potion\nA potion made from grinding Red Herbs."
    );
    assert_eq!(snapshot.item(1201).unwrap().description, "A well-balanced dagger.\nATK 17");

    // No supplement entry: generated fallback, never empty.
    assert_eq!(snapshot.item(909).unwrap().description, "Jellopy - Etc");
}

#[test]
fn test_monster_fields_and_mvp_detection() {
    let tmp = TempDir::new().unwrap();
    let (snapshot, _) = load_fixture_catalog(&tmp);

    let poring = snapshot.monster(1002).unwrap();
    assert_eq!(poring.name, "Poring");
    assert_eq!(poring.element, "Water");
    assert_eq!(poring.stats.hp, 50);
    assert_eq!(poring.stats.luck, 30);
    assert_eq!(poring.stats.strength, 1); // upstream default
    assert!(!poring.mvp);

    let osiris = snapshot.monster(1038).unwrap();
    assert!(osiris.mvp);
    assert_eq!(osiris.mvp_drops.len(), 1);
}

#[test]
fn test_drop_references_resolve_to_item_ids() {
    let tmp = TempDir::new().unwrap();
    let (snapshot, _) = load_fixture_catalog(&tmp);

    let drops = &snapshot.monster(1002).unwrap().drops;
    assert_eq!(drops.len(), 3);

    let jellopy = drops.iter().find(|d| d.item_name == "Jellopy").unwrap();
    assert_eq!(jellopy.item_id, Some(909));
    assert_eq!(jellopy.rate, 70.0);
    assert!(!jellopy.steal_protected);

    let knife = drops.iter().find(|d| d.item_name == "Knife").unwrap();
    assert_eq!(knife.item_id, Some(1201));
    assert!(knife.steal_protected);

    // Items the catalog does not know stay unresolved.
    let unknown = drops.iter().find(|d| d.item_name == "Unknown_Loot").unwrap();
    assert_eq!(unknown.item_id, None);
}

// =============================================================================
// Snapshot Query Tests
// =============================================================================

#[test]
fn test_id_lookup_round_trip() {
    let tmp = TempDir::new().unwrap();
    let (snapshot, _) = load_fixture_catalog(&tmp);

    for id in FIXTURE_ITEM_IDS {
        assert_eq!(snapshot.item(id).unwrap().id, id);
    }
    for id in FIXTURE_MONSTER_IDS {
        assert_eq!(snapshot.monster(id).unwrap().id, id);
    }
    assert!(snapshot.item(4242).is_none());
    assert!(snapshot.monster(4242).is_none());
}

#[test]
fn test_search_exact_and_fuzzy() {
    let tmp = TempDir::new().unwrap();
    let (snapshot, _) = load_fixture_catalog(&tmp);

    let exact = snapshot.search_items("red potion", true);
    assert_eq!(exact.len(), 1);
    assert_eq!(exact.first().unwrap().id, 501);

    let fuzzy = snapshot.search_items("POTION", false);
    let fuzzy_ids: Vec<u32> = fuzzy.iter().map(|i| i.id).collect();
    assert_eq!(fuzzy_ids, vec![501, 502]); // ascending id order

    // Every exact match is also a fuzzy match.
    for item in &exact {
        assert!(fuzzy_ids.contains(&item.id));
    }

    // Whitespace-only queries degrade to empty results.
    assert!(snapshot.search_items("   ", false).is_empty());
    assert!(snapshot.search_monsters("", true).is_empty());
}

#[test]
fn test_filters_are_case_insensitive() {
    let tmp = TempDir::new().unwrap();
    let (snapshot, _) = load_fixture_catalog(&tmp);

    let weapons: Vec<u32> = snapshot.items_by_type("WEAPON").iter().map(|i| i.id).collect();
    assert_eq!(weapons, vec![1201]);

    let water: Vec<u32> = snapshot
        .monsters_by_element("water")
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(water, vec![1002]);

    let mvps: Vec<u32> = snapshot.mvp_monsters().iter().map(|m| m.id).collect();
    assert_eq!(mvps, vec![1038]);

    assert!(snapshot.items_by_type("cards").is_empty());
}

#[test]
fn test_pagination_covers_every_entity_exactly_once() {
    let tmp = TempDir::new().unwrap();
    let (snapshot, _) = load_fixture_catalog(&tmp);
    let total = snapshot.item_count();

    for k in 1..=total {
        let mut seen = Vec::new();
        let mut offset = 0;
        loop {
            let (page, page_total) = snapshot.items_page(offset, k);
            assert_eq!(page_total, total);
            if page.is_empty() {
                break;
            }
            seen.extend(page.iter().map(|i| i.id));
            offset += k;
        }
        assert_eq!(seen, FIXTURE_ITEM_IDS.to_vec(), "page size {}", k);
    }
}

#[test]
fn test_pagination_clamps() {
    let tmp = TempDir::new().unwrap();
    let (snapshot, _) = load_fixture_catalog(&tmp);

    // Limit past the remainder returns the remainder, never errors.
    let (page, total) = snapshot.items_page(3, 100);
    assert_eq!(total, 5);
    assert_eq!(page.len(), 2);

    // Offset past the end yields an empty page.
    let (page, _) = snapshot.items_page(99, 10);
    assert!(page.is_empty());
}

#[test]
fn test_loading_twice_yields_identical_snapshots() {
    let tmp = TempDir::new().unwrap();
    let sources = common::write_sources(tmp.path());

    let (first, _) = catalog::load(&sources).unwrap();
    let (second, _) = catalog::load(&sources).unwrap();

    assert_eq!(first.item_ids(), second.item_ids());
    for &id in first.item_ids() {
        assert_eq!(first.item(id), second.item(id));
    }
    for id in FIXTURE_MONSTER_IDS {
        assert_eq!(first.monster(id), second.monster(id));
    }
}
