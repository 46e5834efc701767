//! Catalog loading — the one startup input that is not allowed to be
//! silently defaulted.
//!
//! Unlike the persistence slots, a catalog that fails to parse is a real
//! error: the deck, the reviewed index, and the saved-set invariant all
//! hang off it, so the host must be told rather than handed an empty
//! deck.

use thiserror::Error;

use questdeck_logic::catalog::{Catalog, Entry};

/// The built-in catalog shipped with the app.
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../../../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has no entries")]
    Empty,
    #[error("catalog entries share the id {0:?}")]
    DuplicateId(String),
}

/// Parse and validate a catalog from JSON: at least one entry, all ids
/// unique.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let entries: Vec<Entry> = serde_json::from_str(json)?;
    if entries.is_empty() {
        return Err(CatalogError::Empty);
    }
    for (i, entry) in entries.iter().enumerate() {
        if entries[..i].iter().any(|e| e.id == entry.id) {
            return Err(CatalogError::DuplicateId(entry.id.clone()));
        }
    }
    Ok(Catalog::new(entries))
}

/// The built-in catalog. Validated like any other input.
pub fn builtin_catalog() -> Result<Catalog, CatalogError> {
    parse_catalog(BUILTIN_CATALOG_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin_catalog().expect("shipped catalog must parse");
        assert!(catalog.len() >= 10);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_catalog("{oops"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn empty_catalog_is_an_error() {
        assert!(matches!(parse_catalog("[]"), Err(CatalogError::Empty)));
    }

    #[test]
    fn duplicate_ids_are_an_error() {
        let json = r##"[
            {"id": "x", "name": "X", "description": "", "category": "DeFi",
             "reward": "", "color": "#fff", "difficulty": "Easy",
             "is_seeker": false, "link": ""},
            {"id": "x", "name": "X2", "description": "", "category": "NFT",
             "reward": "", "color": "#fff", "difficulty": "Hard",
             "is_seeker": true, "link": ""}
        ]"##;
        assert!(matches!(
            parse_catalog(json),
            Err(CatalogError::DuplicateId(id)) if id == "x"
        ));
    }
}
