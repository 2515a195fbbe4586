//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use bindu_core::rng::DeterministicRng;

/// An RNG that always picks the first option. For tests that do not care
/// which entry or echo is chosen.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// An RNG that returns values from a predetermined sequence, then repeats
/// `min` once the sequence is exhausted. Used in tests that need specific,
/// repeatable picks (e.g. which narrative entry a reset selects).
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        let Some(val) = self.values.get(self.index).copied() else {
            return min;
        };
        self.index += 1;
        val
    }
}
