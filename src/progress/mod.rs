//! Quest, points and wardrobe progression.
//!
//! A learner completes catalog quests for points, spends points on cosmetic
//! items and equips owned or free items into slots. The record lives in a
//! key-value store under a single key and is reconciled against defaults on
//! every load.

pub mod catalog;
pub mod engine;
pub mod errors;
pub mod reconcile;
pub mod storage;
pub mod types;
pub mod view;

pub use catalog::{Catalog, Item, Quest, Slot};
pub use engine::{apply, Action, Outcome, ProgressTracker, Rejection, Transition};
pub use errors::ProgressError;
pub use reconcile::reconcile;
pub use storage::{KeyValueStore, MemoryStore, ProgressStore, ProgressStoreBuilder, SledStore};
pub use types::{Equipped, ProgressionRecord, DEFAULT_LEVEL, DEFAULT_STORAGE_KEY, DEFAULT_TITLE};
pub use view::{format_equipped, format_quest_board, format_shop, format_status, format_wardrobe};
