//! The progression store: the single owner of the durable ledger.
//!
//! A store only exists once every slot has been loaded (or defaulted) —
//! there is no half-loaded state for an operation to race against. Every
//! mutation updates the in-memory ledger and then hands the touched slots
//! to the durability layer before returning; writes are best-effort, so a
//! crash immediately after a mutation loses at most that one mutation.
//!
//! Derived values (level, achievement unlocks, saved-collection stats)
//! are recomputed from the ledger on every query.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use questdeck_logic::achievements::{unlocked_achievements, LedgerView};
use questdeck_logic::catalog::Catalog;
use questdeck_logic::gesture::SwipeOutcome;
use questdeck_logic::ledger::{LevelProgress, ProgressionLedger};
use questdeck_logic::quests::quest_by_id;

use crate::persistence::{keys, SlotStore};

/// Shape of the `quest_state` slot.
#[derive(Debug, Default, Serialize, Deserialize)]
struct QuestStateSlot {
    completed: Vec<String>,
    credited: Vec<String>,
}

pub struct ProgressionStore<S: SlotStore> {
    backend: S,
    ledger: ProgressionLedger,
}

impl<S: SlotStore> ProgressionStore<S> {
    /// Load every slot from `backend`, defaulting anything absent or
    /// malformed, and return a ready store. Saved ids unknown to the
    /// catalog are dropped during load so the saved-set ⊆ catalog
    /// invariant holds from the first query.
    pub fn load(backend: S, catalog: &Catalog) -> Self {
        let reviewed = read_u64(&backend, keys::REVIEWED_INDEX).unwrap_or(0) as usize;
        let xp_total = read_u64(&backend, keys::XP_TOTAL).unwrap_or(0) as u32;
        let streak = read_u64(&backend, keys::STREAK_DAYS).unwrap_or(1) as u32;
        let high_score = read_u64(&backend, keys::RUNNER_HIGH_SCORE).unwrap_or(0) as u32;

        let mut saved = read_strings(&backend, keys::SAVED_ENTRIES);
        let before = saved.len();
        saved.retain(|id| catalog.contains_id(id));
        if saved.len() < before {
            debug!(
                "dropped {} saved id(s) not present in the catalog",
                before - saved.len()
            );
        }

        let quest_state: QuestStateSlot = backend
            .load(keys::QUEST_STATE)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        let ledger = ProgressionLedger::restore(
            reviewed,
            saved,
            xp_total,
            streak,
            quest_state.completed,
            quest_state.credited,
            high_score,
        );
        Self { backend, ledger }
    }

    /// Read-only view of the ledger.
    pub fn ledger(&self) -> &ProgressionLedger {
        &self.ledger
    }

    pub fn level(&self) -> LevelProgress {
        self.ledger.level()
    }

    /// Achievement ids currently unlocked, derived fresh on every call.
    pub fn unlocked_achievements(&self, catalog: &Catalog) -> Vec<&'static str> {
        unlocked_achievements(&LedgerView::new(&self.ledger, catalog))
    }

    // ── Mutations (each persists its touched slots before returning) ────

    /// Apply one card decision. Returns whether the entry was newly saved.
    pub fn record_decision(&mut self, entry_id: &str, outcome: SwipeOutcome) -> bool {
        let newly_saved = self.ledger.record_decision(entry_id, outcome);
        self.persist_cards();
        newly_saved
    }

    /// Reset the card sub-ledger. XP/streak/quest state are untouched.
    pub fn reset_cards(&mut self) {
        self.ledger.reset_cards();
        self.persist_cards();
    }

    pub fn add_xp(&mut self, amount: u32) {
        self.ledger.add_xp(amount);
        self.persist_slot(keys::XP_TOTAL, json!(self.ledger.xp_total()));
    }

    /// Flip a quest's completion flag; unknown ids are no-ops. Returns
    /// whether the quest's XP was credited by this call.
    pub fn toggle_quest(&mut self, quest_id: &str) -> bool {
        let Some(quest) = quest_by_id(quest_id) else {
            warn!("toggle for unknown quest id {quest_id:?} ignored");
            return false;
        };
        let awarded = self.ledger.toggle_quest(quest);
        self.persist_quests();
        if awarded {
            self.persist_slot(keys::XP_TOTAL, json!(self.ledger.xp_total()));
        }
        awarded
    }

    /// Record a daily check-in. Returns the new streak length.
    pub fn record_check_in(&mut self) -> u32 {
        let streak = self.ledger.record_check_in();
        self.persist_slot(keys::STREAK_DAYS, json!(streak));
        streak
    }

    /// Fold a runner score into the stored best. Returns whether it was a
    /// new record (only records are persisted).
    pub fn record_high_score(&mut self, score: u32) -> bool {
        if self.ledger.record_high_score(score) {
            self.persist_slot(keys::RUNNER_HIGH_SCORE, json!(self.ledger.high_score()));
            return true;
        }
        false
    }

    // ── Slot writes ─────────────────────────────────────────────────────

    fn persist_cards(&self) {
        self.persist_slot(keys::REVIEWED_INDEX, json!(self.ledger.reviewed_index()));
        self.persist_slot(keys::SAVED_ENTRIES, json!(self.ledger.saved_ids()));
    }

    fn persist_quests(&self) {
        let slot = QuestStateSlot {
            completed: self
                .ledger
                .completed_quest_ids()
                .into_iter()
                .map(String::from)
                .collect(),
            credited: self
                .ledger
                .credited_quest_ids()
                .into_iter()
                .map(String::from)
                .collect(),
        };
        match serde_json::to_value(&slot) {
            Ok(value) => self.persist_slot(keys::QUEST_STATE, value),
            Err(e) => warn!("quest state serialize failed ({e}), slot not written"),
        }
    }

    fn persist_slot(&self, key: &str, value: Value) {
        if !self.backend.store(key, &value) {
            warn!("slot {key} not persisted; continuing with in-memory state");
        }
    }
}

fn read_u64<S: SlotStore>(backend: &S, key: &str) -> Option<u64> {
    backend.load(key).and_then(|v| v.as_u64())
}

fn read_strings<S: SlotStore>(backend: &S, key: &str) -> Vec<String> {
    backend
        .load(key)
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}
