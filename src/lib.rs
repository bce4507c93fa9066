//! plop-renumber: deterministic ID renumbering for Tableplop character exports
//!
//! A Tableplop character sheet is a flat list of "properties" that form a forest
//! through `parentId` links. Each top-level `tab-section` is the root of one tab
//! (Character, Inventory, Feats, Spells, Background). This crate rewrites the
//! export so every tab occupies its own contiguous id range, making the sheet
//! usable as a stable template.
//!
//! # Pipeline
//!
//! 1. **Index** -- [`index`] builds record-by-id and children-by-parent lookups
//! 2. **Walk** -- [`walk`] does a stack-based pre-order walk per tab, siblings
//!    ordered by `(rank, id)`
//! 3. **Allocate** -- [`allocate`] hands out `base + 1, base + 2, ...` in walk order
//! 4. **Rewrite** -- [`rewrite`] swaps ids and parent links, clears `characterId`
//! 5. **Order** -- [`order`] emits each tab subtree in walk order, then leftovers
//!
//! Tabs with no known base, dangling parents and orphans are tolerated: their
//! records keep the ids they came with.
//!
//! # Key Modules
//!
//! - [`config`] -- Tab base table
//! - [`models`] -- The `Property` record
//! - [`document`] -- JSON load/save and the end-to-end run
//! - [`stats`] -- Per-run counters for the summary
//!
//! # Example Usage
//!
//! ```bash
//! plop-renumber character.json template.json
//! ```

pub mod allocate;
pub mod config;
pub mod document;
pub mod index;
pub mod models;
pub mod order;
pub mod rewrite;
pub mod stats;
pub mod walk;
