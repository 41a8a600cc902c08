use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::progress::catalog::Slot;

pub const DEFAULT_LEVEL: i64 = 1;
pub const DEFAULT_TITLE: &str = "New Adventurer";

/// Storage key the record lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "questionlearn_demo_v1";

/// Serialise a set of ids as `{ "<id>": true, ... }`.
mod presence_map {
    use super::*;
    use serde::ser::SerializeMap;

    pub fn serialize<S>(ids: &BTreeSet<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(ids.len()))?;
        for id in ids {
            map.serialize_entry(id, &true)?;
        }
        map.end()
    }
}

/// What is worn in each slot.
///
/// A slot key may be absent when a persisted `equipped` object named only
/// some slots; absent and `None` both read as empty, but absent keys are not
/// written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Equipped(BTreeMap<Slot, Option<String>>);

impl Equipped {
    /// Every slot present and empty.
    pub fn empty() -> Self {
        Self(Slot::ALL.iter().map(|slot| (*slot, None)).collect())
    }

    /// Only the given slot entries, nothing else.
    pub fn from_entries(entries: impl IntoIterator<Item = (Slot, Option<String>)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.0.get(&slot).and_then(|id| id.as_deref())
    }

    pub fn set(&mut self, slot: Slot, item_id: impl Into<String>) {
        self.0.insert(slot, Some(item_id.into()));
    }

    /// Whether the slot key is carried at all (empty or not).
    pub fn has_entry(&self, slot: Slot) -> bool {
        self.0.contains_key(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, Option<&str>)> + '_ {
        self.0.iter().map(|(slot, id)| (*slot, id.as_deref()))
    }
}

impl Default for Equipped {
    fn default() -> Self {
        Self::empty()
    }
}

/// Persisted progression state for one learner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionRecord {
    pub points: u64,
    /// Display only; no operation changes it.
    pub level: i64,
    /// Display only; no operation changes it.
    pub title: String,
    #[serde(serialize_with = "presence_map::serialize")]
    pub completed_quests: BTreeSet<String>,
    #[serde(serialize_with = "presence_map::serialize")]
    pub owned_items: BTreeSet<String>,
    pub equipped: Equipped,
    /// Unrecognised top-level fields from the persisted document, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProgressionRecord {
    pub fn has_completed(&self, quest_id: &str) -> bool {
        self.completed_quests.contains(quest_id)
    }

    pub fn owns(&self, item_id: &str) -> bool {
        self.owned_items.contains(item_id)
    }
}

impl Default for ProgressionRecord {
    fn default() -> Self {
        Self {
            points: 0,
            level: DEFAULT_LEVEL,
            title: DEFAULT_TITLE.to_string(),
            completed_quests: BTreeSet::new(),
            owned_items: BTreeSet::new(),
            equipped: Equipped::empty(),
            extra: Map::new(),
        }
    }
}
