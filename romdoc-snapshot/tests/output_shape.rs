//! Output-contract tests: document key casing, null normalization, and the
//! slug-collision rules the downstream renderer depends on.

use std::collections::BTreeMap;

use romdoc_core::slugify;
use romdoc_snapshot::entities::{GameRecord, LookupRecord};
use romdoc_snapshot::projects::ProjectRecord;

fn game_record(id: &str, name: &str) -> GameRecord {
    GameRecord {
        id: id.to_string(),
        slug: slugify(Some(name)),
        name: Some(name.to_string()),
        meta: None,
        platform_id: None,
        developer_id: None,
        created_at: None,
        updated_at: None,
        active_branch: None,
    }
}

#[test]
fn records_serialize_camel_case_with_explicit_nulls() {
    let json = serde_json::to_value(game_record("g-1", "Illusion of Gaia")).unwrap();

    assert_eq!(json["slug"], "illusion-of-gaia");
    assert_eq!(json["activeBranch"], serde_json::Value::Null);
    assert_eq!(json["platformId"], serde_json::Value::Null);
    assert!(json.get("platform_id").is_none());
}

#[test]
fn project_without_active_branch_keeps_scalar_fields() {
    let record = ProjectRecord {
        id: "p-1".to_string(),
        name: Some("Gaia Retold".to_string()),
        slug: slugify(Some("Gaia Retold")),
        meta: None,
        game_id: Some("g-1".to_string()),
        base_rom_id: Some("b-1".to_string()),
        created_at: Some("2024-01-01T00:00:00Z".to_string()),
        updated_at: Some("2024-06-01T00:00:00Z".to_string()),
        active_branch: None,
    };
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["activeBranch"], serde_json::Value::Null);
    assert_eq!(json["name"], "Gaia Retold");
    assert_eq!(json["gameId"], "g-1");
    assert_eq!(json["baseRomId"], "b-1");
    assert_eq!(json["updatedAt"], "2024-06-01T00:00:00Z");
}

#[test]
fn colliding_slugs_keep_last_listed_record_in_maps() {
    // "SNES!" and "SNES?" both slugify to "snes"; map-keyed documents keep
    // exactly one entry, the later listing.
    let mut map: BTreeMap<String, GameRecord> = BTreeMap::new();
    for record in [game_record("g-1", "SNES!"), game_record("g-2", "SNES?")] {
        map.insert(record.slug.clone(), record);
    }

    assert_eq!(map.len(), 1);
    assert_eq!(map["snes"].id, "g-2");
}

#[test]
fn colliding_slugs_both_survive_in_arrays() {
    let records = vec![game_record("g-1", "SNES!"), game_record("g-2", "SNES?")];
    assert_eq!(records[0].slug, records[1].slug);
    assert_eq!(records.len(), 2);
}

#[test]
fn lookup_record_shape() {
    let record = LookupRecord {
        id: "d-1".to_string(),
        name: Some("Quintet".to_string()),
        slug: slugify(Some("Quintet")),
        meta: None,
        platform_id: Some("p-1".to_string()),
        created_at: None,
        updated_at: None,
    };
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["slug"], "quintet");
    assert_eq!(json["platformId"], "p-1");
    assert_eq!(json["meta"], serde_json::Value::Null);
}
