//! Integration tests for progression record loading, merging and saving.

use questlearn::progress::{
    Catalog, ProgressStore, ProgressStoreBuilder, ProgressTracker, ProgressionRecord, Slot,
};
use serde_json::{json, Value};
use tempfile::tempdir;

fn stored_json(store: &ProgressStore) -> Value {
    let bytes = store.get_raw().unwrap().expect("record present");
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_saved_record_uses_schema_field_names() {
    let tmp = tempdir().unwrap();
    let store = ProgressStore::open(tmp.path()).unwrap();
    let mut record = ProgressionRecord::default();
    record.points = 12;
    record.completed_quests.insert("reflection".to_string());
    record.owned_items.insert("tiny-orb".to_string());
    record.equipped.set(Slot::Pet, "tiny-orb");

    store.save(&record).unwrap();

    assert_eq!(
        stored_json(&store),
        json!({
            "points": 12,
            "level": 1,
            "title": "New Adventurer",
            "completedQuests": { "reflection": true },
            "ownedItems": { "tiny-orb": true },
            "equipped": { "hat": null, "outfit": null, "aura": null, "pet": "tiny-orb" }
        })
    );
}

#[test]
fn test_save_load_round_trip() {
    let tmp = tempdir().unwrap();
    let store = ProgressStore::open(tmp.path()).unwrap();
    let mut record = ProgressionRecord::default();
    record.points = 77;
    record.level = 3;
    record.title = "Scholar".to_string();
    record.completed_quests.insert("reading-check".to_string());
    record.completed_quests.insert("vocab-practice".to_string());
    record.owned_items.insert("scholar-cape".to_string());
    record.equipped.set(Slot::Outfit, "scholar-cape");
    record.equipped.set(Slot::Pet, "tiny-orb");

    store.save(&record).unwrap();
    let loaded = store.load();
    assert_eq!(loaded, record);

    store.save(&loaded).unwrap();
    assert_eq!(store.load(), record);
}

#[test]
fn test_partial_record_fills_defaults() {
    let tmp = tempdir().unwrap();
    let store = ProgressStore::open(tmp.path()).unwrap();
    store
        .put_raw(br#"{"points": 30, "completedQuests": {"reading-check": true}}"#)
        .unwrap();

    let record = store.load();
    assert_eq!(record.points, 30);
    assert_eq!(record.level, 1);
    assert_eq!(record.title, "New Adventurer");
    assert!(record.has_completed("reading-check"));
    assert!(record.owned_items.is_empty());
    for slot in Slot::ALL {
        assert!(record.equipped.has_entry(slot));
        assert_eq!(record.equipped.get(slot), None);
    }
}

#[test]
fn test_partial_equipped_replaces_default_wholesale() {
    let tmp = tempdir().unwrap();
    let store = ProgressStore::open(tmp.path()).unwrap();
    store
        .put_raw(br#"{"points": 0, "equipped": {"pet": "tiny-orb"}}"#)
        .unwrap();

    let record = store.load();
    assert_eq!(record.equipped.get(Slot::Pet), Some("tiny-orb"));
    assert!(!record.equipped.has_entry(Slot::Hat));

    // Saving writes back only the slots that were carried
    store.save(&record).unwrap();
    assert_eq!(stored_json(&store)["equipped"], json!({ "pet": "tiny-orb" }));
}

#[test]
fn test_equipping_into_missing_slot_adds_it() {
    let tmp = tempdir().unwrap();
    let store = ProgressStoreBuilder::new(tmp.path()).open().unwrap();
    store
        .put_raw(br#"{"points": 50, "equipped": {"pet": "tiny-orb"}}"#)
        .unwrap();
    let tracker = ProgressTracker::new(store, Catalog::standard());

    tracker.buy_item("wizard-hat").unwrap();

    let equipped = &stored_json(tracker.store())["equipped"];
    assert_eq!(equipped, &json!({ "hat": "wizard-hat", "pet": "tiny-orb" }));
}

#[test]
fn test_corrupt_record_loads_default() {
    let tmp = tempdir().unwrap();
    let store = ProgressStore::open(tmp.path()).unwrap();
    let cases: [&[u8]; 5] = [b"not json at all", b"", b"[1,2,3]", b"42", b"null"];
    for raw in cases {
        store.put_raw(raw).unwrap();
        assert_eq!(store.load(), ProgressionRecord::default());
    }
}

#[test]
fn test_unknown_fields_survive_an_operation() {
    let tmp = tempdir().unwrap();
    let store = ProgressStore::open(tmp.path()).unwrap();
    store
        .put_raw(br#"{"points": 5, "nickname": "owl", "streak": {"days": 3}}"#)
        .unwrap();
    let tracker = ProgressTracker::new(store, Catalog::standard());

    tracker.complete_quest("reflection").unwrap();

    let saved = stored_json(tracker.store());
    assert_eq!(saved["points"], json!(15));
    assert_eq!(saved["nickname"], json!("owl"));
    assert_eq!(saved["streak"], json!({ "days": 3 }));
}

#[test]
fn test_reset_then_load_is_fresh_default() {
    let tmp = tempdir().unwrap();
    let store = ProgressStore::open(tmp.path()).unwrap();
    let mut record = ProgressionRecord::default();
    record.points = 99;
    record.title = "Archmage".to_string();
    store.save(&record).unwrap();

    store.reset().unwrap();

    assert!(store.get_raw().unwrap().is_none());
    assert_eq!(store.load(), ProgressionRecord::default());
}
