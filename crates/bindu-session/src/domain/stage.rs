//! Session stages.

use serde::{Deserialize, Serialize};

/// A discrete phase of the session. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// No identity connected. Initial stage.
    #[default]
    Disconnected,
    /// Connected; waiting for `awaken`.
    AwaitingAwaken,
    /// Trial shown; waiting for `1` or `2`.
    AwaitingChoice,
    /// Revelation shown; no input accepted.
    Revelation,
    /// Cooldown counting down to an automatic reset.
    Hiatus,
}

impl Stage {
    /// Whether the presentation layer should offer an input control.
    #[must_use]
    pub fn accepts_input(self) -> bool {
        matches!(self, Self::AwaitingAwaken | Self::AwaitingChoice)
    }

    /// Stable lowercase name, used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::AwaitingAwaken => "awaiting_awaken",
            Self::AwaitingChoice => "awaiting_choice",
            Self::Revelation => "revelation",
            Self::Hiatus => "hiatus",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_prompt_stages_accept_input() {
        assert!(!Stage::Disconnected.accepts_input());
        assert!(Stage::AwaitingAwaken.accepts_input());
        assert!(Stage::AwaitingChoice.accepts_input());
        assert!(!Stage::Revelation.accepts_input());
        assert!(!Stage::Hiatus.accepts_input());
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_value(Stage::AwaitingChoice).unwrap();
        assert_eq!(json, "awaiting_choice");
    }
}
