//! Built-in quest and item catalog.
//!
//! The catalog is fixed at startup and never mutated. Lookups return `None`
//! for unknown ids; there is no other failure mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Equip slot. Each slot holds at most one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Hat,
    Outfit,
    Aura,
    Pet,
}

impl Slot {
    /// All slots in display order.
    pub const ALL: [Slot; 4] = [Slot::Hat, Slot::Outfit, Slot::Aura, Slot::Pet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Hat => "hat",
            Slot::Outfit => "outfit",
            Slot::Aura => "aura",
            Slot::Pet => "pet",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hat" => Ok(Slot::Hat),
            "outfit" => Ok(Slot::Outfit),
            "aura" => Ok(Slot::Aura),
            "pet" => Ok(Slot::Pet),
            other => Err(format!("unknown slot: {}", other)),
        }
    }
}

/// A quest that awards points once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    pub id: &'static str,
    pub name: &'static str,
    pub points: u64,
}

/// A cosmetic item. Price zero means free: equippable without buying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    pub slot: Slot,
    pub price: u64,
}

impl Item {
    pub fn is_free(&self) -> bool {
        self.price == 0
    }
}

const STANDARD_QUESTS: &[Quest] = &[
    Quest {
        id: "reading-check",
        name: "Reading Check",
        points: 20,
    },
    Quest {
        id: "vocab-practice",
        name: "Vocabulary Practice",
        points: 15,
    },
    Quest {
        id: "reflection",
        name: "Reflection Prompt",
        points: 10,
    },
];

const STANDARD_ITEMS: &[Item] = &[
    Item {
        id: "wizard-hat",
        name: "Wizard Hat",
        slot: Slot::Hat,
        price: 35,
    },
    Item {
        id: "scholar-cape",
        name: "Scholar’s Cape",
        slot: Slot::Outfit,
        price: 60,
    },
    Item {
        id: "glow-aura",
        name: "Glow Aura",
        slot: Slot::Aura,
        price: 40,
    },
    Item {
        id: "tiny-orb",
        name: "Tiny Orb Familiar",
        slot: Slot::Pet,
        price: 0,
    },
];

/// Read-only registry of quests and items.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    quests: &'static [Quest],
    items: &'static [Item],
}

impl Catalog {
    /// The built-in catalog.
    pub fn standard() -> Self {
        Self {
            quests: STANDARD_QUESTS,
            items: STANDARD_ITEMS,
        }
    }

    /// Build a catalog over other static tables (used by tests).
    pub fn new(quests: &'static [Quest], items: &'static [Item]) -> Self {
        Self { quests, items }
    }

    pub fn quests(&self) -> &'static [Quest] {
        self.quests
    }

    pub fn items(&self) -> &'static [Item] {
        self.items
    }

    pub fn quest(&self, id: &str) -> Option<&'static Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&'static Item> {
        self.items.iter().find(|i| i.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
