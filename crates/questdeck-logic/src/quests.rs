//! The quest table — fixed definitions the ledger's completion flags key
//! into.
//!
//! Daily and weekly quests are meant to reset on calendar boundaries; no
//! such scheduler exists here, so the flags persist until something
//! external clears them. Completion is toggleable, but each quest's XP is
//! credited at most once ever (see the ledger's credited set).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestKind {
    Daily,
    Weekly,
    Special,
}

/// One quest definition. The ledger references these by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quest {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub xp: u32,
    pub kind: QuestKind,
}

/// All quests, in display order.
pub const QUESTS: [Quest; 19] = [
    // Daily
    Quest {
        id: "daily-gm",
        title: "GM Check-in",
        description: "Validate your daily GM",
        xp: 10,
        kind: QuestKind::Daily,
    },
    Quest {
        id: "daily-swipe",
        title: "Swipe Session",
        description: "Swipe through 5 projects today",
        xp: 10,
        kind: QuestKind::Daily,
    },
    Quest {
        id: "daily-save",
        title: "Save a Project",
        description: "Save at least 1 project today",
        xp: 10,
        kind: QuestKind::Daily,
    },
    Quest {
        id: "daily-runner",
        title: "Runner Regular",
        description: "Score 30+ in the runner",
        xp: 15,
        kind: QuestKind::Daily,
    },
    Quest {
        id: "daily-skr-stake",
        title: "Daily SKR Stake",
        description: "Stake a minimum of 20 SKR today",
        xp: 25,
        kind: QuestKind::Daily,
    },
    Quest {
        id: "daily-sol-stake",
        title: "Daily SOL Stake",
        description: "Stake SOL with a validator of your choice",
        xp: 20,
        kind: QuestKind::Daily,
    },
    Quest {
        id: "daily-swap",
        title: "Daily Swap",
        description: "Make a swap on a native Seeker dApp",
        xp: 15,
        kind: QuestKind::Daily,
    },
    // Weekly
    Quest {
        id: "weekly-full-sweep",
        title: "Full Sweep",
        description: "Complete all daily quests every day for 7 days",
        xp: 300,
        kind: QuestKind::Weekly,
    },
    Quest {
        id: "weekly-gm-streak",
        title: "7-Day GM Streak",
        description: "Maintain a 7-day GM streak",
        xp: 200,
        kind: QuestKind::Weekly,
    },
    Quest {
        id: "weekly-high-scorer",
        title: "High Scorer",
        description: "Score 200+ in the runner this week",
        xp: 150,
        kind: QuestKind::Weekly,
    },
    Quest {
        id: "weekly-skr-staker",
        title: "Weekly SKR Staker",
        description: "Stake SKR at least once this week",
        xp: 200,
        kind: QuestKind::Weekly,
    },
    Quest {
        id: "weekly-sol-staker",
        title: "Weekly SOL Staker",
        description: "Stake SOL every day for 7 days",
        xp: 250,
        kind: QuestKind::Weekly,
    },
    Quest {
        id: "weekly-swap-master",
        title: "Swap Master",
        description: "Complete a daily swap 7 days straight",
        xp: 200,
        kind: QuestKind::Weekly,
    },
    Quest {
        id: "weekly-skr-believer",
        title: "SKR Believer",
        description: "Stake 140+ SKR total this week",
        xp: 350,
        kind: QuestKind::Weekly,
    },
    // Special (one-time)
    Quest {
        id: "special-connect-wallet",
        title: "Connect Wallet",
        description: "Link your Solana wallet",
        xp: 500,
        kind: QuestKind::Special,
    },
    Quest {
        id: "special-diamond-hands",
        title: "SKR Diamond Hands",
        description: "Stake $100+ worth of SKR",
        xp: 2000,
        kind: QuestKind::Special,
    },
    Quest {
        id: "special-rate-app",
        title: "Leave a Review",
        description: "Rate the app on the dApp store",
        xp: 300,
        kind: QuestKind::Special,
    },
    Quest {
        id: "special-explorer",
        title: "Explorer",
        description: "Review every project in the catalog",
        xp: 250,
        kind: QuestKind::Special,
    },
    Quest {
        id: "special-validator-og",
        title: "SOL Validator OG",
        description: "Stake a minimum of 2 SOL with the official validator",
        xp: 1500,
        kind: QuestKind::Special,
    },
];

pub fn quest_by_id(id: &str) -> Option<&'static Quest> {
    QUESTS.iter().find(|q| q.id == id)
}

pub fn quests_of_kind(kind: QuestKind) -> impl Iterator<Item = &'static Quest> {
    QUESTS.iter().filter(move |q| q.kind == kind)
}
