//! Reconcile a persisted document against the default record.
//!
//! This is a shallow, per-field overlay: each top-level field present and
//! well-typed in the document replaces the default, everything else keeps the
//! default. `equipped` is replaced wholesale, never merged slot by slot, so a
//! partial `equipped` object drops the slots it does not name.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::progress::catalog::Slot;
use crate::progress::types::{Equipped, ProgressionRecord};

const KNOWN_FIELDS: [&str; 6] = [
    "points",
    "level",
    "title",
    "completedQuests",
    "ownedItems",
    "equipped",
];

/// Build a record from a parsed persisted document. Never fails.
pub fn reconcile(document: &Value) -> ProgressionRecord {
    let mut record = ProgressionRecord::default();
    let Value::Object(fields) = document else {
        return record;
    };

    if let Some(points) = fields.get("points").and_then(Value::as_u64) {
        record.points = points;
    }
    if let Some(level) = fields.get("level").and_then(Value::as_i64) {
        record.level = level;
    }
    if let Some(title) = fields.get("title").and_then(Value::as_str) {
        record.title = title.to_string();
    }
    if let Some(Value::Object(map)) = fields.get("completedQuests") {
        record.completed_quests = present_ids(map);
    }
    if let Some(Value::Object(map)) = fields.get("ownedItems") {
        record.owned_items = present_ids(map);
    }
    if let Some(Value::Object(map)) = fields.get("equipped") {
        record.equipped = equipped_from(map);
    }

    record.extra = fields
        .iter()
        .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    record
}

fn present_ids(map: &Map<String, Value>) -> BTreeSet<String> {
    map.iter()
        .filter(|(_, flag)| is_truthy(flag))
        .map(|(id, _)| id.clone())
        .collect()
}

fn equipped_from(map: &Map<String, Value>) -> Equipped {
    Equipped::from_entries(map.iter().filter_map(|(key, value)| {
        let slot = key.parse::<Slot>().ok()?;
        let item = match value {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            _ => None,
        };
        Some((slot, item))
    }))
}

/// Membership flags follow JSON truthiness: `false`, `0`, `""` and `null` mean absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
