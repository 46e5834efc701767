//! The progression ledger — reviewed index, saved set, XP, streak, quest
//! completion.
//!
//! All mutation goes through the methods here, which maintain the
//! cross-field invariants: `reviewed_index` only grows (except the explicit
//! card reset), `saved_ids` stays duplicate-free in insertion order,
//! `xp_total` never decreases (each quest credits its XP at most once,
//! however often its completion flag is toggled), and `streak_days` never
//! drops below 1. Achievement unlock status is *not* stored here — it is
//! derived on every query, see the `achievements` module.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constants::progression::XP_PER_LEVEL;
use crate::gesture::SwipeOutcome;
use crate::quests::Quest;

/// Pure derivation of level standing from total XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub xp_into_level: u32,
    pub xp_per_level: u32,
}

/// The durable progression record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionLedger {
    reviewed_index: usize,
    saved_ids: Vec<String>,
    xp_total: u32,
    streak_days: u32,
    quest_completion: BTreeMap<String, bool>,
    credited_quests: BTreeSet<String>,
    high_score: u32,
}

impl ProgressionLedger {
    /// Fresh first-run ledger.
    pub fn new() -> Self {
        Self {
            reviewed_index: 0,
            saved_ids: Vec::new(),
            xp_total: 0,
            streak_days: 1,
            quest_completion: BTreeMap::new(),
            credited_quests: BTreeSet::new(),
            high_score: 0,
        }
    }

    /// Rebuild a ledger from persisted slot values, sanitizing each field:
    /// saved ids are de-duplicated preserving first occurrence, the streak
    /// floor of 1 is enforced, and credited ids are kept as given.
    pub fn restore(
        reviewed_index: usize,
        saved_ids: Vec<String>,
        xp_total: u32,
        streak_days: u32,
        completed_quests: Vec<String>,
        credited_quests: Vec<String>,
        high_score: u32,
    ) -> Self {
        let mut deduped = Vec::with_capacity(saved_ids.len());
        for id in saved_ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }
        Self {
            reviewed_index,
            saved_ids: deduped,
            xp_total,
            streak_days: streak_days.max(1),
            quest_completion: completed_quests.into_iter().map(|id| (id, true)).collect(),
            credited_quests: credited_quests.into_iter().collect(),
            high_score,
        }
    }

    // ── Read accessors ──────────────────────────────────────────────────

    pub fn reviewed_index(&self) -> usize {
        self.reviewed_index
    }

    pub fn saved_ids(&self) -> &[String] {
        &self.saved_ids
    }

    pub fn is_saved(&self, entry_id: &str) -> bool {
        self.saved_ids.iter().any(|id| id == entry_id)
    }

    pub fn xp_total(&self) -> u32 {
        self.xp_total
    }

    pub fn streak_days(&self) -> u32 {
        self.streak_days
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn quest_completed(&self, quest_id: &str) -> bool {
        self.quest_completion.get(quest_id).copied().unwrap_or(false)
    }

    /// Ids of quests currently flagged complete, in id order.
    pub fn completed_quest_ids(&self) -> Vec<&str> {
        self.quest_completion
            .iter()
            .filter(|(_, &done)| done)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Ids of quests whose XP has ever been credited, in id order.
    pub fn credited_quest_ids(&self) -> Vec<&str> {
        self.credited_quests.iter().map(|id| id.as_str()).collect()
    }

    /// Level standing derived from total XP. Never cached.
    pub fn level(&self) -> LevelProgress {
        LevelProgress {
            level: self.xp_total / XP_PER_LEVEL + 1,
            xp_into_level: self.xp_total % XP_PER_LEVEL,
            xp_per_level: XP_PER_LEVEL,
        }
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Apply one card decision. The reviewed index advances by exactly one
    /// regardless of outcome; a `Save` appends the id unless it is already
    /// present. Returns whether the id was newly saved.
    pub fn record_decision(&mut self, entry_id: &str, outcome: SwipeOutcome) -> bool {
        let newly_saved = outcome == SwipeOutcome::Save && !self.is_saved(entry_id);
        if newly_saved {
            self.saved_ids.push(entry_id.to_string());
        }
        self.reviewed_index += 1;
        newly_saved
    }

    /// Reset the card sub-ledger: reviewed index to zero, saved set
    /// cleared. XP, streak, and quest state are untouched.
    pub fn reset_cards(&mut self) {
        self.reviewed_index = 0;
        self.saved_ids.clear();
    }

    /// Accumulate XP. Monotone — there is no subtraction path.
    pub fn add_xp(&mut self, amount: u32) {
        self.xp_total += amount;
    }

    /// Flip a quest's completion flag. The quest's XP is credited the
    /// first time it is ever completed and never again, so toggling off
    /// and back on cannot double-count. Returns whether XP was credited
    /// by this call.
    pub fn toggle_quest(&mut self, quest: &Quest) -> bool {
        let flag = self
            .quest_completion
            .entry(quest.id.to_string())
            .or_insert(false);
        *flag = !*flag;
        if *flag && self.credited_quests.insert(quest.id.to_string()) {
            self.xp_total += quest.xp;
            return true;
        }
        false
    }

    /// Record a daily check-in, extending the streak. Returns the new
    /// streak length.
    pub fn record_check_in(&mut self) -> u32 {
        self.streak_days += 1;
        self.streak_days
    }

    /// Fold a runner score into the stored best. Returns whether it was a
    /// new record.
    pub fn record_high_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            return true;
        }
        false
    }
}

impl Default for ProgressionLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quests::quest_by_id;

    #[test]
    fn fresh_ledger_defaults() {
        let l = ProgressionLedger::new();
        assert_eq!(l.reviewed_index(), 0);
        assert!(l.saved_ids().is_empty());
        assert_eq!(l.xp_total(), 0);
        assert_eq!(l.streak_days(), 1);
        assert_eq!(l.level().level, 1);
    }

    #[test]
    fn reviewed_index_advances_once_per_decision() {
        let mut l = ProgressionLedger::new();
        let script = [
            ("a", SwipeOutcome::Save),
            ("b", SwipeOutcome::Skip),
            ("c", SwipeOutcome::Save),
            ("c", SwipeOutcome::Save),
            ("d", SwipeOutcome::Skip),
        ];
        for (i, (id, outcome)) in script.iter().enumerate() {
            l.record_decision(id, *outcome);
            assert_eq!(l.reviewed_index(), i + 1);
        }
    }

    #[test]
    fn duplicate_save_is_idempotent() {
        let mut l = ProgressionLedger::new();
        assert!(l.record_decision("a", SwipeOutcome::Save));
        assert!(!l.record_decision("a", SwipeOutcome::Save));
        assert_eq!(l.saved_ids(), ["a".to_string()]);
        assert_eq!(l.reviewed_index(), 2);
    }

    #[test]
    fn saved_never_exceeds_reviewed() {
        let mut l = ProgressionLedger::new();
        let outcomes = [SwipeOutcome::Save, SwipeOutcome::Skip];
        for i in 0..50 {
            let id = format!("entry-{}", i % 7);
            l.record_decision(&id, outcomes[i % 2]);
            assert!(l.saved_ids().len() <= l.reviewed_index());
        }
        // No duplicates either.
        let mut seen = std::collections::BTreeSet::new();
        assert!(l.saved_ids().iter().all(|id| seen.insert(id)));
    }

    #[test]
    fn save_order_preserved() {
        let mut l = ProgressionLedger::new();
        l.record_decision("z", SwipeOutcome::Save);
        l.record_decision("a", SwipeOutcome::Save);
        l.record_decision("m", SwipeOutcome::Save);
        assert_eq!(l.saved_ids(), ["z", "a", "m"]);
    }

    #[test]
    fn reset_cards_scopes_to_card_subledger() {
        let mut l = ProgressionLedger::new();
        l.record_decision("a", SwipeOutcome::Save);
        l.add_xp(120);
        l.record_check_in();
        let xp_before = l.xp_total();
        let streak_before = l.streak_days();

        l.reset_cards();

        assert_eq!(l.reviewed_index(), 0);
        assert!(l.saved_ids().is_empty());
        assert_eq!(l.xp_total(), xp_before);
        assert_eq!(l.streak_days(), streak_before);
    }

    #[test]
    fn level_derivation() {
        let mut l = ProgressionLedger::new();
        assert_eq!(l.level().level, 1);
        l.add_xp(799);
        assert_eq!(l.level().level, 1);
        assert_eq!(l.level().xp_into_level, 799);
        l.add_xp(1);
        assert_eq!(l.level().level, 2);
        assert_eq!(l.level().xp_into_level, 0);
        l.add_xp(2400);
        assert_eq!(l.level().level, 5);
    }

    #[test]
    fn quest_xp_credited_once_across_toggles() {
        let mut l = ProgressionLedger::new();
        let quest = quest_by_id("daily-gm").unwrap();

        assert!(l.toggle_quest(quest));
        assert_eq!(l.xp_total(), quest.xp);
        assert!(l.quest_completed(quest.id));

        // Off and on again: flag flips, XP does not move.
        assert!(!l.toggle_quest(quest));
        assert!(!l.quest_completed(quest.id));
        assert!(!l.toggle_quest(quest));
        assert!(l.quest_completed(quest.id));
        assert_eq!(l.xp_total(), quest.xp);
    }

    #[test]
    fn xp_monotone_over_random_toggles() {
        let mut l = ProgressionLedger::new();
        let a = quest_by_id("daily-swipe").unwrap();
        let b = quest_by_id("weekly-gm-streak").unwrap();
        let mut last = 0;
        for i in 0..20 {
            l.toggle_quest(if i % 3 == 0 { a } else { b });
            assert!(l.xp_total() >= last);
            last = l.xp_total();
        }
        assert_eq!(last, a.xp + b.xp);
    }

    #[test]
    fn check_in_extends_streak() {
        let mut l = ProgressionLedger::new();
        assert_eq!(l.record_check_in(), 2);
        assert_eq!(l.record_check_in(), 3);
    }

    #[test]
    fn high_score_only_improves() {
        let mut l = ProgressionLedger::new();
        assert!(l.record_high_score(10));
        assert!(!l.record_high_score(5));
        assert!(!l.record_high_score(10));
        assert!(l.record_high_score(11));
        assert_eq!(l.high_score(), 11);
    }

    #[test]
    fn restore_sanitizes() {
        let l = ProgressionLedger::restore(
            3,
            vec!["a".into(), "b".into(), "a".into()],
            950,
            0,
            vec!["daily-gm".into()],
            vec!["daily-gm".into()],
            42,
        );
        assert_eq!(l.saved_ids(), ["a", "b"]);
        assert_eq!(l.streak_days(), 1, "streak floor is 1");
        assert!(l.quest_completed("daily-gm"));
        assert_eq!(l.level().level, 2);
        assert_eq!(l.high_score(), 42);
    }
}
