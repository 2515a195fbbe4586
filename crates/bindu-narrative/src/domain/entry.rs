//! Narrative entries.

use serde::{Deserialize, Serialize};

/// One of the two revelation branches offered by a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    /// First branch, chosen with `1`.
    A,
    /// Second branch, chosen with `2`.
    B,
}

/// A static micro-myth driving the text of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeEntry {
    /// Stable identifier, e.g. `MYTHE_CODEUR`.
    pub id: String,
    /// Invocation line shown once the awakening is signed.
    pub invocation: String,
    /// Trial prompt asking for `1` or `2`.
    pub trial: String,
    /// Revelation text for branch A.
    pub revelation_a: String,
    /// Revelation text for branch B.
    pub revelation_b: String,
}

impl NarrativeEntry {
    /// Returns the revelation text for the chosen branch.
    #[must_use]
    pub fn revelation(&self, branch: Branch) -> &str {
        match branch {
            Branch::A => &self.revelation_a,
            Branch::B => &self.revelation_b,
        }
    }

    /// Invocation and trial joined the way they are displayed.
    #[must_use]
    pub fn opening_text(&self) -> String {
        format!("{}\n{}", self.invocation, self.trial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> NarrativeEntry {
        NarrativeEntry {
            id: "A".to_owned(),
            invocation: "inv".to_owned(),
            trial: "trial".to_owned(),
            revelation_a: "left".to_owned(),
            revelation_b: "right".to_owned(),
        }
    }

    #[test]
    fn test_revelation_picks_branch_text() {
        let entry = entry();
        assert_eq!(entry.revelation(Branch::A), "left");
        assert_eq!(entry.revelation(Branch::B), "right");
    }

    #[test]
    fn test_opening_text_joins_invocation_and_trial() {
        assert_eq!(entry().opening_text(), "inv\ntrial");
    }
}
