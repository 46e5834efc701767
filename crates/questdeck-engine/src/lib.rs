//! QuestDeck runtime shell.
//!
//! Everything stateful that the pure logic crate refuses to own lives
//! here: the slot persistence boundary, the load-gated progression store,
//! the card session that wires pointer events into the store, the catalog
//! loader, and the timer thread driving the runner simulation.
//!
//! The concurrency model is deliberately small. Store mutations are plain
//! `&mut self` calls — the exclusive borrow is the serialization, so the
//! ledger's cross-field invariants are never observable half-updated. The
//! runner loop is the only thread, and it shares nothing with the store;
//! its results come back over an event channel and the host decides what
//! to persist.

pub mod catalog_source;
pub mod persistence;
pub mod runner_loop;
pub mod session;
pub mod store;

pub use catalog_source::{builtin_catalog, parse_catalog, CatalogError};
pub use persistence::{JsonFileStore, MemoryStore, SlotStore};
pub use runner_loop::{RunnerEvent, RunnerLoop};
pub use session::{CardDecision, CardSession};
pub use store::ProgressionStore;
