//! Achievement definitions and evaluation.
//!
//! Unlock status is never stored. Each achievement is an independent
//! boolean predicate over a [`LedgerView`], and [`unlocked_achievements`]
//! re-evaluates the whole table on every call — it cannot go stale
//! relative to the ledger because there is nothing to invalidate.

use crate::catalog::{self, Catalog};
use crate::ledger::ProgressionLedger;

/// The ledger fields achievement predicates are allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerView {
    pub reviewed: usize,
    pub saved_count: usize,
    pub seeker_saved: usize,
    pub streak_days: u32,
    pub catalog_size: usize,
}

impl LedgerView {
    /// Project the ledger and catalog down to the predicate inputs.
    pub fn new(ledger: &ProgressionLedger, catalog: &Catalog) -> Self {
        Self {
            reviewed: ledger.reviewed_index(),
            saved_count: ledger.saved_ids().len(),
            seeker_saved: catalog::seeker_saved_count(catalog, ledger.saved_ids()),
            streak_days: ledger.streak_days(),
            catalog_size: catalog.len(),
        }
    }
}

/// One achievement: metadata plus its unlock predicate.
#[derive(Clone, Copy)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    predicate: fn(&LedgerView) -> bool,
}

impl Achievement {
    pub fn is_unlocked(&self, view: &LedgerView) -> bool {
        (self.predicate)(view)
    }
}

impl std::fmt::Debug for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Achievement").field("id", &self.id).finish()
    }
}

/// The fixed achievement table, evaluated uniformly.
pub const ACHIEVEMENTS: [Achievement; 6] = [
    Achievement {
        id: "first-swipe",
        title: "First Swipe",
        description: "Review your first project",
        predicate: |v| v.reviewed >= 1,
    },
    Achievement {
        id: "collector",
        title: "Collector",
        description: "Save 5 projects",
        predicate: |v| v.saved_count >= 5,
    },
    Achievement {
        id: "curator",
        title: "Curator",
        description: "Save 10 projects",
        predicate: |v| v.saved_count >= 10,
    },
    Achievement {
        id: "seeker-scout",
        title: "Seeker Scout",
        description: "Save 5 Seeker dApps",
        predicate: |v| v.seeker_saved >= 5,
    },
    Achievement {
        id: "deck-cleared",
        title: "Deck Cleared",
        description: "Review every project in the catalog",
        predicate: |v| v.catalog_size > 0 && v.reviewed >= v.catalog_size,
    },
    Achievement {
        id: "on-fire",
        title: "On Fire",
        description: "Hold a 7-day streak",
        predicate: |v| v.streak_days >= 7,
    },
];

/// Ids of every achievement whose predicate holds for `view`, in table
/// order. Recomputed from scratch on every call.
pub fn unlocked_achievements(view: &LedgerView) -> Vec<&'static str> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.is_unlocked(view))
        .map(|a| a.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> LedgerView {
        LedgerView {
            reviewed: 0,
            saved_count: 0,
            seeker_saved: 0,
            streak_days: 1,
            catalog_size: 12,
        }
    }

    #[test]
    fn fresh_ledger_unlocks_nothing() {
        assert!(unlocked_achievements(&view()).is_empty());
    }

    #[test]
    fn single_review_unlocks_first_swipe() {
        let v = LedgerView {
            reviewed: 1,
            ..view()
        };
        assert_eq!(unlocked_achievements(&v), vec!["first-swipe"]);
    }

    #[test]
    fn thresholds() {
        let v = LedgerView {
            reviewed: 12,
            saved_count: 10,
            seeker_saved: 5,
            streak_days: 7,
            catalog_size: 12,
        };
        let unlocked = unlocked_achievements(&v);
        for a in &ACHIEVEMENTS {
            assert!(unlocked.contains(&a.id), "{} should be unlocked", a.id);
        }
    }

    #[test]
    fn boundaries_are_inclusive() {
        let v = LedgerView {
            saved_count: 5,
            ..view()
        };
        assert!(unlocked_achievements(&v).contains(&"collector"));
        let v = LedgerView {
            saved_count: 4,
            ..view()
        };
        assert!(!unlocked_achievements(&v).contains(&"collector"));
    }

    #[test]
    fn empty_catalog_never_clears_deck() {
        let v = LedgerView {
            reviewed: 0,
            catalog_size: 0,
            ..view()
        };
        assert!(!unlocked_achievements(&v).contains(&"deck-cleared"));
    }

    #[test]
    fn evaluation_is_pure() {
        let v = LedgerView {
            reviewed: 7,
            saved_count: 6,
            seeker_saved: 2,
            streak_days: 9,
            catalog_size: 12,
        };
        assert_eq!(unlocked_achievements(&v), unlocked_achievements(&v));
    }

    #[test]
    fn ids_unique() {
        for (i, a) in ACHIEVEMENTS.iter().enumerate() {
            for b in &ACHIEVEMENTS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
