//! Pure domain logic for QuestDeck.
//!
//! This crate contains the three stateful cores of the app — the swipe
//! gesture state machine, the endless-runner simulation, and the
//! progression ledger — plus the read-only catalog model and the fixed
//! quest/achievement tables. Nothing here touches files, timers, or
//! threads: functions take plain data and return results, randomness
//! enters through caller-supplied `Rng` handles, and every piece is
//! unit-testable in isolation. The runtime shell lives in
//! `questdeck-engine`.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`achievements`] | Fixed predicate table, unlock status derived per query |
//! | [`catalog`] | Ordered read-only entry deck and saved-set statistics |
//! | [`constants`] | Gesture thresholds, runner physics, progression rates |
//! | [`gesture`] | Drag-to-decision state machine with settle delivery |
//! | [`ledger`] | Durable progression record and its invariants |
//! | [`quests`] | Quest definitions the completion flags key into |
//! | [`runner`] | Fixed-timestep mini-game simulation and collision |

pub mod achievements;
pub mod catalog;
pub mod constants;
pub mod gesture;
pub mod ledger;
pub mod quests;
pub mod runner;
