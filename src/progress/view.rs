//! Plain-text listings of a record against the catalog.
//!
//! Each formatter returns one string per line so callers decide how to print.

use crate::progress::catalog::{Catalog, Slot};
use crate::progress::types::ProgressionRecord;

/// Points, level and title.
pub fn format_status(record: &ProgressionRecord) -> Vec<String> {
    vec![
        format!("Points: {}", record.points),
        format!("Level: {}", record.level),
        format!("Title: {}", record.title),
    ]
}

/// Every quest with its reward and whether it is done.
pub fn format_quest_board(record: &ProgressionRecord, catalog: &Catalog) -> Vec<String> {
    let mut lines = vec!["=== Quests ===".to_string()];
    for quest in catalog.quests() {
        let marker = if record.has_completed(quest.id) {
            "Completed"
        } else {
            "Complete"
        };
        lines.push(format!(
            "{} ({}) (+{}) [{}]",
            quest.name, quest.id, quest.points, marker
        ));
    }
    lines
}

/// Priced items only. Free items are not sold.
pub fn format_shop(record: &ProgressionRecord, catalog: &Catalog) -> Vec<String> {
    let mut lines = vec!["=== Shop ===".to_string()];
    for item in catalog.items().iter().filter(|i| !i.is_free()) {
        let owned = record.owns(item.id);
        let equipped = record.equipped.get(item.slot) == Some(item.id);
        let price = if owned {
            "Owned".to_string()
        } else {
            format!("{} pts", item.price)
        };
        let marker = match (owned, equipped) {
            (false, _) if record.points < item.price => "Buy (locked)",
            (false, _) => "Buy",
            (true, true) => "Equipped",
            (true, false) => "Equip",
        };
        lines.push(format!(
            "{} ({}, {}) - {} [{}]",
            item.name, item.id, item.slot, price, marker
        ));
    }
    lines
}

/// Items that can be worn right now: free ones and owned ones.
pub fn format_wardrobe(record: &ProgressionRecord, catalog: &Catalog) -> Vec<String> {
    let mut lines = vec!["=== Wardrobe ===".to_string()];
    let available: Vec<_> = catalog
        .items()
        .iter()
        .filter(|i| i.is_free() || record.owns(i.id))
        .collect();
    if available.is_empty() {
        lines.push("Nothing to wear yet.".to_string());
        return lines;
    }
    for item in available {
        let marker = if record.equipped.get(item.slot) == Some(item.id) {
            "Equipped"
        } else {
            "Equip"
        };
        lines.push(format!("{} ({}, {}) [{}]", item.name, item.id, item.slot, marker));
    }
    lines
}

/// One line per slot: the worn item's name, `None`, or `Unknown` for ids
/// missing from the catalog.
pub fn format_equipped(record: &ProgressionRecord, catalog: &Catalog) -> Vec<String> {
    Slot::ALL
        .iter()
        .map(|slot| {
            let label = match record.equipped.get(*slot) {
                None => "None",
                Some(id) => catalog.item(id).map(|i| i.name).unwrap_or("Unknown"),
            };
            format!("{}: {}", slot, label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_hides_free_items_and_locks_unaffordable() {
        let record = ProgressionRecord {
            points: 40,
            ..ProgressionRecord::default()
        };
        let lines = format_shop(&record, &Catalog::standard());
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| !l.contains("tiny-orb")));
        assert!(lines[1].starts_with("Wizard Hat") && lines[1].ends_with("[Buy]"));
        assert!(lines[2].contains("60 pts") && lines[2].ends_with("[Buy (locked)]"));
    }

    #[test]
    fn equipped_labels() {
        let mut record = ProgressionRecord::default();
        record.equipped.set(Slot::Pet, "tiny-orb");
        record.equipped.set(Slot::Hat, "retired-hat");
        let lines = format_equipped(&record, &Catalog::standard());
        assert_eq!(
            lines,
            vec![
                "hat: Unknown",
                "outfit: None",
                "aura: None",
                "pet: Tiny Orb Familiar"
            ]
        );
    }
}
