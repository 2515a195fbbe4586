//! The narrative store: an immutable, non-empty table of entries.

use bindu_core::error::DomainError;

use super::entry::NarrativeEntry;

/// Immutable table of narrative entries. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeStore {
    entries: Vec<NarrativeEntry>,
}

impl NarrativeStore {
    /// Builds a store from `entries`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyNarrativeStore` if `entries` is empty, and
    /// `DomainError::Validation` if two entries share an identifier.
    pub fn new(entries: Vec<NarrativeEntry>) -> Result<Self, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::EmptyNarrativeStore);
        }
        for (index, entry) in entries.iter().enumerate() {
            if entries[..index].iter().any(|other| other.id == entry.id) {
                return Err(DomainError::Validation(format!(
                    "duplicate narrative entry id: {}",
                    entry.id
                )));
            }
        }
        Ok(Self { entries })
    }

    /// All entries, in definition order.
    #[must_use]
    pub fn entries(&self) -> &[NarrativeEntry] {
        &self.entries
    }

    /// Number of entries (always at least one).
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> NarrativeEntry {
        NarrativeEntry {
            id: id.to_owned(),
            invocation: String::new(),
            trial: String::new(),
            revelation_a: String::new(),
            revelation_b: String::new(),
        }
    }

    #[test]
    fn test_new_rejects_empty_entries() {
        assert_eq!(
            NarrativeStore::new(Vec::new()),
            Err(DomainError::EmptyNarrativeStore)
        );
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = NarrativeStore::new(vec![entry("A"), entry("B"), entry("A")]);
        match result {
            Err(DomainError::Validation(message)) => assert!(message.contains('A')),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_find_returns_entry_by_id() {
        let store = NarrativeStore::new(vec![entry("A"), entry("B")]).unwrap();
        assert_eq!(store.entry_count(), 2);
        let ids: Vec<&str> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
