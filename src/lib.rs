//! # Questlearn - quest and wardrobe progression tracker
//!
//! A learner earns points by completing a fixed set of quests, spends points
//! on cosmetic items, and equips owned (or free) items into four slots. The
//! progression record persists in a local key-value store between sessions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use questlearn::progress::{Catalog, ProgressStore, ProgressTracker};
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = ProgressStore::open("data/progress")?;
//!     let tracker = ProgressTracker::new(store, Catalog::standard());
//!
//!     tracker.complete_quest("reading-check")?;
//!     tracker.equip_item("tiny-orb")?;
//!     println!("points: {}", tracker.load().points);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`progress`] - catalog, record types, reconciliation, storage and rules
//! - [`config`] - configuration loading and defaults
//! - [`logutil`] - log-safe escaping of user input
//!
//! ```text
//! ┌─────────────────┐
//! │   CLI / UI      │ ← renders listings, issues actions
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ ProgressTracker │ ← load → apply → save
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  ProgressStore  │ ← key-value persistence
//! └─────────────────┘
//! ```

pub mod config;
pub mod logutil;
pub mod progress;
