//! The entry catalog — the ordered, read-only deck the user reviews.
//!
//! The catalog is supplied once at startup and never mutated. The ledger's
//! `reviewed_index` is a position into this sequence. Collection statistics
//! over the saved set (seeker count, category breakdown) are pure functions
//! recomputed on demand — nothing here is cached.

use serde::{Deserialize, Serialize};

/// How involved trying an entry is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One immutable catalog record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Unique id, stable across releases — this is what the ledger stores.
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Reward blurb shown on the card.
    pub reward: String,
    /// Accent color as a hex string, e.g. `"#9945FF"`.
    pub color: String,
    pub difficulty: Difficulty,
    /// Whether the entry ships on the Seeker dApp store.
    pub is_seeker: bool,
    /// External project link.
    pub link: String,
}

/// An ordered, read-only sequence of entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a deck position. `None` once the deck is exhausted.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn entry_by_id(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.entry_by_id(id).is_some()
    }
}

/// Resolve saved ids to entries, preserving save order. Ids not present in
/// the catalog are skipped.
pub fn saved_entries<'a>(catalog: &'a Catalog, saved_ids: &[String]) -> Vec<&'a Entry> {
    saved_ids
        .iter()
        .filter_map(|id| catalog.entry_by_id(id))
        .collect()
}

/// How many saved entries are Seeker dApps.
pub fn seeker_saved_count(catalog: &Catalog, saved_ids: &[String]) -> usize {
    saved_entries(catalog, saved_ids)
        .iter()
        .filter(|e| e.is_seeker)
        .count()
}

/// Distinct categories among the saved entries, in first-seen order.
pub fn distinct_categories(catalog: &Catalog, saved_ids: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for entry in saved_entries(catalog, saved_ids) {
        if !seen.contains(&entry.category) {
            seen.push(entry.category.clone());
        }
    }
    seen
}

/// How many saved entries fall in any of the given categories.
pub fn category_saved_count(catalog: &Catalog, saved_ids: &[String], categories: &[&str]) -> usize {
    saved_entries(catalog, saved_ids)
        .iter()
        .filter(|e| categories.contains(&e.category.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, category: &str, is_seeker: bool) -> Entry {
        Entry {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: format!("{id} description"),
            category: category.to_string(),
            reward: "10 XP".to_string(),
            color: "#9945FF".to_string(),
            difficulty: Difficulty::Easy,
            is_seeker,
            link: format!("https://example.com/{id}"),
        }
    }

    fn test_catalog() -> Catalog {
        Catalog::new(vec![
            entry("jup", "DeFi", false),
            entry("tensor", "NFT", true),
            entry("drift", "DeFi", true),
            entry("dialect", "Social", true),
        ])
    }

    #[test]
    fn indexed_by_position() {
        let c = test_catalog();
        assert_eq!(c.len(), 4);
        assert_eq!(c.get(0).map(|e| e.id.as_str()), Some("jup"));
        assert!(c.get(4).is_none());
    }

    #[test]
    fn lookup_by_id() {
        let c = test_catalog();
        assert!(c.contains_id("drift"));
        assert!(!c.contains_id("unknown"));
    }

    #[test]
    fn saved_entries_preserve_save_order() {
        let c = test_catalog();
        let saved = vec!["drift".to_string(), "jup".to_string()];
        let resolved = saved_entries(&c, &saved);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].id, "drift");
        assert_eq!(resolved[1].id, "jup");
    }

    #[test]
    fn unknown_saved_ids_skipped() {
        let c = test_catalog();
        let saved = vec!["gone".to_string(), "tensor".to_string()];
        assert_eq!(saved_entries(&c, &saved).len(), 1);
    }

    #[test]
    fn seeker_count() {
        let c = test_catalog();
        let saved = vec![
            "jup".to_string(),
            "tensor".to_string(),
            "dialect".to_string(),
        ];
        assert_eq!(seeker_saved_count(&c, &saved), 2);
    }

    #[test]
    fn categories_first_seen_order() {
        let c = test_catalog();
        let saved = vec![
            "drift".to_string(),
            "jup".to_string(),
            "tensor".to_string(),
        ];
        assert_eq!(distinct_categories(&c, &saved), vec!["DeFi", "NFT"]);
    }

    #[test]
    fn entry_deserializes_from_catalog_json_shape() {
        let json = r##"{
            "id": "jupiter",
            "name": "Jupiter",
            "description": "Swap aggregator.",
            "category": "DeFi",
            "reward": "Fee rebates",
            "color": "#16A34A",
            "difficulty": "Medium",
            "is_seeker": false,
            "link": "https://jup.ag"
        }"##;
        let e: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(e.id, "jupiter");
        assert_eq!(e.difficulty, Difficulty::Medium);
        assert!(!e.is_seeker);
    }

    #[test]
    fn category_breakdown() {
        let c = test_catalog();
        let saved = vec![
            "jup".to_string(),
            "drift".to_string(),
            "dialect".to_string(),
        ];
        assert_eq!(category_saved_count(&c, &saved, &["DeFi", "Staking"]), 2);
    }
}
