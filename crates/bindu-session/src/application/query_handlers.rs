//! Read-only view of the session for the presentation layer.

use serde::Serialize;

use crate::domain::stage::Stage;
use crate::domain::state::SessionState;

/// Snapshot of everything the presentation layer may read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// Current stage.
    pub stage: Stage,
    /// Whether an input control should be shown.
    pub accepts_input: bool,
    /// Accumulated output text.
    pub display_text: String,
    /// Transient glitch flag raised by a choice.
    pub glitching: bool,
    /// Seconds left in the hiatus.
    pub hiatus_countdown: u32,
    /// Echo line shown during the hiatus.
    pub poetic_echo: Option<String>,
    /// Connected public identifier.
    pub public_identifier: Option<String>,
    /// Identifier of the active narrative entry.
    pub narrative_id: Option<String>,
    /// Handle of the live ephemeral token, if any.
    pub minted_token: Option<String>,
}

/// Builds the view of `state`.
#[must_use]
pub fn session_view(state: &SessionState) -> SessionView {
    SessionView {
        stage: state.stage(),
        accepts_input: state.stage().accepts_input(),
        display_text: state.display_text().to_owned(),
        glitching: state.glitching(),
        hiatus_countdown: state.hiatus_countdown(),
        poetic_echo: state.poetic_echo().map(str::to_owned),
        public_identifier: state.identity().map(ToString::to_string),
        narrative_id: state.narrative().map(|entry| entry.id.clone()),
        minted_token: state.minted_token().map(ToString::to_string),
    }
}
