//! Uniform random selection over narrative content.
//!
//! Selection is a pure function of the input slice and the injected RNG; it
//! is never cached, so every call draws afresh.

use bindu_core::rng::DeterministicRng;

use crate::domain::entry::NarrativeEntry;
use crate::domain::store::NarrativeStore;

/// Picks one item uniformly at random. Returns `None` for an empty slice.
pub fn pick_uniform<'a, T>(items: &'a [T], rng: &mut dyn DeterministicRng) -> Option<&'a T> {
    let last = items.len().checked_sub(1)?;
    let max = u32::try_from(last).unwrap_or(u32::MAX);
    let index = rng.next_u32_range(0, max) as usize;
    items.get(index.min(last))
}

/// Selects a narrative entry with probability `1/N`.
pub fn select_entry<'a>(
    store: &'a NarrativeStore,
    rng: &mut dyn DeterministicRng,
) -> &'a NarrativeEntry {
    let entries = store.entries();
    // The store is non-empty by construction.
    pick_uniform(entries, rng).unwrap_or(&entries[0])
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bindu_core::rng::StdRandom;
    use bindu_test_support::{MockRng, SequenceRng};

    use super::*;

    fn store_of(ids: &[&str]) -> NarrativeStore {
        let entries = ids
            .iter()
            .map(|id| NarrativeEntry {
                id: (*id).to_owned(),
                invocation: format!("{id} invocation"),
                trial: format!("{id} trial"),
                revelation_a: format!("{id} a"),
                revelation_b: format!("{id} b"),
            })
            .collect();
        NarrativeStore::new(entries).unwrap()
    }

    #[test]
    fn test_select_entry_uses_rng_index() {
        // Arrange
        let store = store_of(&["A", "B", "C"]);
        let mut rng = SequenceRng::new(vec![2, 0, 1]);

        // Act
        let picks: Vec<&str> = (0..3)
            .map(|_| select_entry(&store, &mut rng).id.as_str())
            .collect();

        // Assert
        assert_eq!(picks, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_select_entry_single_entry_store_always_returns_it() {
        let store = store_of(&["ONLY"]);
        let mut rng = StdRandom::seeded(3);
        for _ in 0..20 {
            assert_eq!(select_entry(&store, &mut rng).id, "ONLY");
        }
    }

    #[test]
    fn test_select_entry_frequencies_are_uniform() {
        // Arrange
        let store = store_of(&["A", "B", "C", "D"]);
        let mut rng = StdRandom::seeded(0x00b1_d0);
        let draws = 1000;

        // Act
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(select_entry(&store, &mut rng).id.as_str()).or_default() += 1;
        }

        // Assert: each frequency within 0.06 of 1/4 (more than 4 standard deviations).
        for id in ["A", "B", "C", "D"] {
            let frequency = counts.get(id).copied().unwrap_or(0) as f64 / f64::from(draws);
            assert!(
                (frequency - 0.25).abs() < 0.06,
                "entry {id} drawn with frequency {frequency}"
            );
        }
    }

    #[test]
    fn test_pick_uniform_empty_slice_returns_none() {
        let empty: [u8; 0] = [];
        assert!(pick_uniform(&empty, &mut MockRng).is_none());
    }

    #[test]
    fn test_pick_uniform_clamps_out_of_range_rng_values() {
        let items = ["x", "y"];
        let mut rng = SequenceRng::new(vec![9]);
        assert_eq!(pick_uniform(&items, &mut rng), Some(&"y"));
    }
}
