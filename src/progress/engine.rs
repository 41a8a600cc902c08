//! Progression rules and the tracker that persists their results.
//!
//! [`apply`] is a pure function of (record, catalog, action). Refused actions
//! leave the record untouched and report why through [`Outcome`]; nothing
//! here is an error except a failed write.

use std::fmt;
use std::sync::Mutex;

use log::{debug, info};

use crate::logutil::escape_log;
use crate::progress::catalog::Catalog;
use crate::progress::errors::ProgressError;
use crate::progress::storage::ProgressStore;
use crate::progress::types::ProgressionRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CompleteQuest(String),
    BuyItem(String),
    EquipItem(String),
}

impl Action {
    pub fn target_id(&self) -> &str {
        match self {
            Action::CompleteQuest(id) | Action::BuyItem(id) | Action::EquipItem(id) => id,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Action::CompleteQuest(_) => "complete",
            Action::BuyItem(_) => "buy",
            Action::EquipItem(_) => "equip",
        };
        write!(f, "{} {}", verb, escape_log(self.target_id()))
    }
}

/// Why a known id was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    AlreadyCompleted,
    AlreadyOwned,
    InsufficientPoints { price: u64, available: u64 },
    /// Priced item that has not been bought.
    NotOwned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    UnknownId,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied => f.write_str("done"),
            Outcome::UnknownId => f.write_str("unknown id"),
            Outcome::Rejected(Rejection::AlreadyCompleted) => f.write_str("already completed"),
            Outcome::Rejected(Rejection::AlreadyOwned) => f.write_str("already owned"),
            Outcome::Rejected(Rejection::InsufficientPoints { price, available }) => {
                write!(f, "not enough points ({} of {})", available, price)
            }
            Outcome::Rejected(Rejection::NotOwned) => f.write_str("not owned"),
        }
    }
}

/// Result of applying one action: the next record and what happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub record: ProgressionRecord,
    pub outcome: Outcome,
}

impl Transition {
    fn unchanged(current: &ProgressionRecord, outcome: Outcome) -> Self {
        Self {
            record: current.clone(),
            outcome,
        }
    }

    pub fn changed(&self) -> bool {
        self.outcome.is_applied()
    }
}

/// Compute the next record for `action`.
pub fn apply(current: &ProgressionRecord, catalog: &Catalog, action: &Action) -> Transition {
    match action {
        Action::CompleteQuest(id) => complete_quest(current, catalog, id),
        Action::BuyItem(id) => buy_item(current, catalog, id),
        Action::EquipItem(id) => equip_item(current, catalog, id),
    }
}

fn complete_quest(current: &ProgressionRecord, catalog: &Catalog, quest_id: &str) -> Transition {
    let Some(quest) = catalog.quest(quest_id) else {
        return Transition::unchanged(current, Outcome::UnknownId);
    };
    if current.has_completed(quest.id) {
        return Transition::unchanged(current, Outcome::Rejected(Rejection::AlreadyCompleted));
    }

    let mut next = current.clone();
    next.completed_quests.insert(quest.id.to_string());
    next.points = next.points.saturating_add(quest.points);
    Transition {
        record: next,
        outcome: Outcome::Applied,
    }
}

fn buy_item(current: &ProgressionRecord, catalog: &Catalog, item_id: &str) -> Transition {
    let Some(item) = catalog.item(item_id) else {
        return Transition::unchanged(current, Outcome::UnknownId);
    };
    if current.owns(item.id) {
        return Transition::unchanged(current, Outcome::Rejected(Rejection::AlreadyOwned));
    }
    if current.points < item.price {
        return Transition::unchanged(
            current,
            Outcome::Rejected(Rejection::InsufficientPoints {
                price: item.price,
                available: current.points,
            }),
        );
    }

    // Buying also equips, replacing whatever the slot held.
    let mut next = current.clone();
    next.points -= item.price;
    next.owned_items.insert(item.id.to_string());
    next.equipped.set(item.slot, item.id);
    Transition {
        record: next,
        outcome: Outcome::Applied,
    }
}

fn equip_item(current: &ProgressionRecord, catalog: &Catalog, item_id: &str) -> Transition {
    let Some(item) = catalog.item(item_id) else {
        return Transition::unchanged(current, Outcome::UnknownId);
    };
    if !item.is_free() && !current.owns(item.id) {
        return Transition::unchanged(current, Outcome::Rejected(Rejection::NotOwned));
    }

    let mut next = current.clone();
    next.equipped.set(item.slot, item.id);
    Transition {
        record: next,
        outcome: Outcome::Applied,
    }
}

/// Runs actions against a store: load, apply, save when changed.
///
/// The whole sequence runs under one lock so concurrent callers cannot
/// interleave between another caller's load and save.
pub struct ProgressTracker {
    store: ProgressStore,
    catalog: Catalog,
    guard: Mutex<()>,
}

impl ProgressTracker {
    pub fn new(store: ProgressStore, catalog: Catalog) -> Self {
        Self {
            store,
            catalog,
            guard: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn load(&self) -> ProgressionRecord {
        let _lock = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        self.store.load()
    }

    pub fn complete_quest(&self, quest_id: &str) -> Result<Outcome, ProgressError> {
        self.run(Action::CompleteQuest(quest_id.to_string()))
    }

    pub fn buy_item(&self, item_id: &str) -> Result<Outcome, ProgressError> {
        self.run(Action::BuyItem(item_id.to_string()))
    }

    pub fn equip_item(&self, item_id: &str) -> Result<Outcome, ProgressError> {
        self.run(Action::EquipItem(item_id.to_string()))
    }

    /// Discard all progress; the next load derives a fresh default.
    pub fn reset(&self) -> Result<(), ProgressError> {
        let _lock = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        self.store.reset()?;
        info!("progression reset");
        Ok(())
    }

    pub fn run(&self, action: Action) -> Result<Outcome, ProgressError> {
        let _lock = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        let current = self.store.load();
        let transition = apply(&current, &self.catalog, &action);
        if transition.changed() {
            self.store.save(&transition.record)?;
            info!("{}: points {} -> {}", action, current.points, transition.record.points);
        } else {
            debug!("{}: no-op ({})", action, transition.outcome);
        }
        Ok(transition.outcome)
    }
}
