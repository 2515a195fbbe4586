//! Session state, owned exclusively by the state machine.

use bindu_core::identity::PublicIdentifier;
use bindu_core::issuer::TokenHandle;
use bindu_narrative::domain::entry::NarrativeEntry;

use super::messages;
use super::stage::Stage;

/// Identifies the session and connection an asynchronous request or timer
/// belongs to. A completion whose ticket no longer matches is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    /// Bumped on connect, disconnect and reset.
    pub generation: u64,
    /// Bumped on connect and disconnect only.
    pub connection_epoch: u64,
}

/// Mutable state of the single session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) stage: Stage,
    pub(crate) identity: Option<PublicIdentifier>,
    pub(crate) narrative: Option<NarrativeEntry>,
    pub(crate) display_text: String,
    pub(crate) glitching: bool,
    pub(crate) hiatus_countdown: u32,
    pub(crate) minted_token: Option<TokenHandle>,
    pub(crate) poetic_echo: Option<String>,
    pub(crate) signature_pending: bool,
    /// Token whose expiry timer is currently armed.
    pub(crate) pending_expiry: Option<TokenHandle>,
    pub(crate) generation: u64,
    pub(crate) connection_epoch: u64,
}

impl SessionState {
    /// Creates the initial, disconnected state.
    #[must_use]
    pub fn new(initial_countdown: u32) -> Self {
        Self {
            stage: Stage::Disconnected,
            identity: None,
            narrative: None,
            display_text: messages::CONNECT_PROMPT.to_owned(),
            glitching: false,
            hiatus_countdown: initial_countdown,
            minted_token: None,
            poetic_echo: None,
            signature_pending: false,
            pending_expiry: None,
            generation: 0,
            connection_epoch: 0,
        }
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Connected identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&PublicIdentifier> {
        self.identity.as_ref()
    }

    /// Narrative entry driving this session; `None` while disconnected.
    #[must_use]
    pub fn narrative(&self) -> Option<&NarrativeEntry> {
        self.narrative.as_ref()
    }

    /// Accumulated output text.
    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Whether the transient glitch flag is raised.
    #[must_use]
    pub fn glitching(&self) -> bool {
        self.glitching
    }

    /// Seconds left before the hiatus resets the session.
    #[must_use]
    pub fn hiatus_countdown(&self) -> u32 {
        self.hiatus_countdown
    }

    /// Handle of the token issued in this session, until its destroy runs.
    #[must_use]
    pub fn minted_token(&self) -> Option<&TokenHandle> {
        self.minted_token.as_ref()
    }

    /// Echo line picked on entering the hiatus.
    #[must_use]
    pub fn poetic_echo(&self) -> Option<&str> {
        self.poetic_echo.as_deref()
    }

    /// Ticket for work started now.
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        Ticket {
            generation: self.generation,
            connection_epoch: self.connection_epoch,
        }
    }

    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    pub(crate) fn same_connection(&self, ticket: Ticket) -> bool {
        ticket.connection_epoch == self.connection_epoch
    }

    pub(crate) fn append(&mut self, notice: &str) {
        self.display_text.push_str(notice);
    }

    /// Clears everything scoped to one session run. Identity and counters
    /// are left to the caller.
    pub(crate) fn clear_run(&mut self, initial_countdown: u32) {
        self.narrative = None;
        self.glitching = false;
        self.hiatus_countdown = initial_countdown;
        self.minted_token = None;
        self.poetic_echo = None;
        self.signature_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_disconnected_with_prompt() {
        let state = SessionState::new(20);
        assert_eq!(state.stage(), Stage::Disconnected);
        assert_eq!(state.display_text(), messages::CONNECT_PROMPT);
        assert_eq!(state.hiatus_countdown(), 20);
        assert!(state.narrative().is_none());
        assert!(state.minted_token().is_none());
    }

    #[test]
    fn test_ticket_staleness_tracks_generation_and_epoch() {
        let mut state = SessionState::new(20);
        let ticket = state.ticket();
        assert!(state.is_current(ticket));

        state.generation += 1;
        assert!(!state.is_current(ticket));
        assert!(state.same_connection(ticket));

        state.connection_epoch += 1;
        assert!(!state.same_connection(ticket));
    }
}
