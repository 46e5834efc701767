//! The card session — wires pointer events through the gesture tracker
//! into the progression store.
//!
//! The host forwards raw pointer samples (`pointer_down` / `pointer_move` /
//! `pointer_up`) and drives the settle animation via `advance`. When a
//! committed gesture's settle completes, the session records the decision
//! into the store and hands the resulting [`CardDecision`] back — the
//! commit event boundary. Decisions always apply to the entry that was on
//! screen when the gesture released, and a new card is only presented once
//! the previous one has fully retired.

use questdeck_logic::catalog::{Catalog, Entry};
use questdeck_logic::gesture::{GesturePhase, ReleaseVerdict, SwipeOutcome, SwipeTracker};

use crate::persistence::SlotStore;
use crate::store::ProgressionStore;

/// One finalized card decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDecision {
    pub entry_id: String,
    pub outcome: SwipeOutcome,
}

pub struct CardSession<S: SlotStore> {
    catalog: Catalog,
    store: ProgressionStore<S>,
    tracker: SwipeTracker,
    card_width: f32,
    pending_entry: Option<String>,
}

impl<S: SlotStore> CardSession<S> {
    pub fn new(catalog: Catalog, store: ProgressionStore<S>, card_width: f32) -> Self {
        Self {
            catalog,
            store,
            tracker: SwipeTracker::new(),
            card_width,
            pending_entry: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &ProgressionStore<S> {
        &self.store
    }

    /// Mutable access to the store for XP/quest/streak operations that do
    /// not flow through the deck.
    pub fn store_mut(&mut self) -> &mut ProgressionStore<S> {
        &mut self.store
    }

    /// The entry currently on top of the deck. `None` once every entry
    /// has been reviewed.
    pub fn current_entry(&self) -> Option<&Entry> {
        self.catalog.get(self.store.ledger().reviewed_index())
    }

    /// Entries left to review.
    pub fn remaining(&self) -> usize {
        self.catalog
            .len()
            .saturating_sub(self.store.ledger().reviewed_index())
    }

    /// Current card offset, for rendering.
    pub fn card_offset(&self) -> f32 {
        self.tracker.offset()
    }

    /// Whether the drag has left the deadzone (for visual feedback).
    pub fn drag_engaged(&self) -> bool {
        self.tracker.is_engaged()
    }

    /// A pointer touched the card. Ignored when the deck is exhausted or a
    /// previous card is still settling.
    pub fn pointer_down(&mut self) {
        if self.current_entry().is_none() {
            return;
        }
        self.tracker.begin();
    }

    /// The pointer moved to horizontal offset `dx`.
    pub fn pointer_move(&mut self, dx: f32) {
        self.tracker.update(dx);
    }

    /// The pointer lifted at offset `dx`. On a commit, the on-screen
    /// entry is captured so the decision applies to it even though
    /// delivery waits for the settle.
    pub fn pointer_up(&mut self, dx: f32) -> ReleaseVerdict {
        let current = self.current_entry().map(|e| e.id.clone());
        let verdict = self.tracker.release(dx, self.card_width);
        if let ReleaseVerdict::Commit(_) = verdict {
            self.pending_entry = current;
        }
        verdict
    }

    /// Advance the settle animation by `dt_ms`. Returns the finalized
    /// decision on the call where a committed gesture's settle completes;
    /// the store has already recorded and persisted it.
    pub fn advance(&mut self, dt_ms: f32) -> Option<CardDecision> {
        let outcome = self.tracker.advance(dt_ms)?;
        let entry_id = self.pending_entry.take()?;
        self.store.record_decision(&entry_id, outcome);
        Some(CardDecision { entry_id, outcome })
    }

    /// Decide the current card directly (the skip/save buttons), without
    /// a gesture. No-op while a swiped card is still settling, and once
    /// the deck is exhausted.
    pub fn decide(&mut self, outcome: SwipeOutcome) -> Option<CardDecision> {
        if self.tracker.phase() == GesturePhase::Settling {
            return None;
        }
        let entry_id = self.current_entry()?.id.clone();
        self.store.record_decision(&entry_id, outcome);
        Some(CardDecision { entry_id, outcome })
    }

    /// Clear the card sub-ledger and re-present the deck from the top.
    pub fn reset(&mut self) {
        self.store.reset_cards();
        self.tracker = SwipeTracker::new();
        self.pending_entry = None;
    }
}
