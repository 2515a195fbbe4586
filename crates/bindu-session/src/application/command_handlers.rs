//! Transition handlers for the session state machine.
//!
//! `SessionMachine` owns the `SessionState` and applies one event at a time:
//! identity changes, submitted commands, signature and issue completions,
//! and timer expiries. Each handler mutates the state synchronously and
//! returns the effects the runtime must carry out, in order.

use std::sync::Arc;

use bindu_core::clock::Clock;
use bindu_core::error::DomainError;
use bindu_core::identity::{IdentityStatus, PublicIdentifier, Signature};
use bindu_core::issuer::{IssueRequest, TokenHandle};
use bindu_core::rng::DeterministicRng;
use bindu_narrative::application::selection::{pick_uniform, select_entry};
use bindu_narrative::content::POETIC_ECHOES;
use bindu_narrative::domain::entry::Branch;
use bindu_narrative::domain::store::NarrativeStore;
use tracing::{debug, info, warn};

use crate::application::effects::{SessionEffect, TimerKind, TimerScope};
use crate::domain::commands::{ParsedCommand, SubmitCommand};
use crate::domain::messages;
use crate::domain::stage::Stage;
use crate::domain::state::{SessionState, Ticket};
use crate::domain::timings::{SessionTimings, TokenTemplate};

/// The session state machine.
pub struct SessionMachine {
    state: SessionState,
    store: Arc<NarrativeStore>,
    rng: Box<dyn DeterministicRng>,
    clock: Arc<dyn Clock>,
    timings: SessionTimings,
    template: TokenTemplate,
}

impl std::fmt::Debug for SessionMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionMachine")
            .field("state", &self.state)
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}

impl SessionMachine {
    /// Creates a machine in the disconnected stage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `timings` cannot drive a session.
    pub fn new(
        store: Arc<NarrativeStore>,
        rng: Box<dyn DeterministicRng>,
        clock: Arc<dyn Clock>,
        timings: SessionTimings,
        template: TokenTemplate,
    ) -> Result<Self, DomainError> {
        timings.validate()?;
        Ok(Self {
            state: SessionState::new(timings.hiatus_countdown),
            store,
            rng,
            clock,
            timings,
            template,
        })
    }

    /// Read-only access to the current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Timings this machine was built with.
    #[must_use]
    pub fn timings(&self) -> &SessionTimings {
        &self.timings
    }

    /// Applies an identity status report. Repeating the current status is a
    /// no-op; a different identifier while connected starts a fresh session.
    pub fn handle_identity_changed(&mut self, status: &IdentityStatus) -> Vec<SessionEffect> {
        match status {
            IdentityStatus::Connected(id) if self.state.identity.as_ref() == Some(id) => Vec::new(),
            IdentityStatus::Connected(id) => self.connect(id.clone()),
            IdentityStatus::Disconnected if self.state.identity.is_none() => Vec::new(),
            IdentityStatus::Disconnected => self.disconnect(),
        }
    }

    /// Applies a submitted command against the current stage.
    pub fn handle_command(&mut self, command: &SubmitCommand) -> Vec<SessionEffect> {
        let parsed = command.parse();
        let stage = self.state.stage;
        debug!(
            correlation_id = %command.correlation_id,
            stage = stage.name(),
            command = ?parsed,
            "handling submitted command"
        );

        match (stage, parsed) {
            (Stage::Revelation, _) => {
                debug!("input ignored during revelation");
                Vec::new()
            }
            (Stage::AwaitingAwaken, ParsedCommand::Awaken) => self.awaken(),
            (Stage::AwaitingChoice, ParsedCommand::Choose(branch)) => self.choose(branch),
            _ => {
                self.state.append(messages::UNKNOWN_COMMAND);
                Vec::new()
            }
        }
    }

    /// Applies the outcome of an attestation signature request.
    pub fn handle_signature_result(
        &mut self,
        ticket: Ticket,
        result: Result<Signature, DomainError>,
    ) -> Vec<SessionEffect> {
        if !self.state.is_current(ticket) {
            debug!(?ticket, "ignoring stale signature completion");
            return Vec::new();
        }
        self.state.signature_pending = false;
        if self.state.stage != Stage::AwaitingAwaken {
            return Vec::new();
        }

        match result {
            Ok(_) => {
                let Some(opening) = self.state.narrative.as_ref().map(|e| e.opening_text()) else {
                    return Vec::new();
                };
                self.state.display_text = opening;
                self.enter(Stage::AwaitingChoice);
            }
            Err(err) => {
                info!(error = %err, "attestation signature rejected");
                self.state.display_text = messages::SYNCHRONIZATION_REJECTED.to_owned();
            }
        }
        Vec::new()
    }

    /// Applies the outcome of a token issue request.
    ///
    /// A completion from a superseded session never touches the current
    /// state. If the connection is unchanged the token still gets its expiry
    /// so it is destroyed on schedule; after a disconnect it is abandoned.
    pub fn handle_issue_result(
        &mut self,
        ticket: Ticket,
        result: Result<TokenHandle, DomainError>,
    ) -> Vec<SessionEffect> {
        let mut effects = Vec::new();

        if !self.state.is_current(ticket) {
            match result {
                Ok(handle) if self.state.same_connection(ticket) => {
                    debug!(%handle, "late token from a superseded session; arming its expiry");
                    self.arm_expiry(handle, &mut effects);
                }
                Ok(handle) => debug!(%handle, "abandoning token issued before disconnect"),
                Err(err) => debug!(error = %err, "ignoring stale issue failure"),
            }
            return effects;
        }

        match result {
            Ok(handle) => {
                info!(%handle, "ephemeral token created");
                self.state
                    .append(&messages::token_created(self.timings.token_lifetime));
                self.state.minted_token = Some(handle.clone());
                self.arm_expiry(handle, &mut effects);
            }
            Err(err) => {
                warn!(error = %err, "ephemeral token creation failed");
                self.state.append(messages::TOKEN_FAILED);
            }
        }
        effects
    }

    /// Applies a stage-scoped timer expiry.
    pub fn handle_timer(&mut self, kind: TimerKind, ticket: Ticket) -> Vec<SessionEffect> {
        if !self.state.is_current(ticket) {
            debug!(?kind, ?ticket, "ignoring stale timer");
            return Vec::new();
        }

        match kind {
            TimerKind::GlitchFlash => {
                self.state.glitching = false;
                Vec::new()
            }
            TimerKind::HiatusEntry if self.state.stage == Stage::Revelation => self.enter_hiatus(),
            TimerKind::HiatusTick if self.state.stage == Stage::Hiatus => self.tick(),
            TimerKind::HiatusEntry | TimerKind::HiatusTick => Vec::new(),
        }
    }

    /// Applies a token expiry: clears the handle if it is still the
    /// session's and requests its destruction.
    pub fn handle_token_expired(&mut self, handle: TokenHandle) -> Vec<SessionEffect> {
        if self.state.pending_expiry.as_ref() != Some(&handle) {
            debug!(%handle, "ignoring expiry of a token no longer tracked");
            return Vec::new();
        }
        self.state.pending_expiry = None;
        if self.state.minted_token.as_ref() == Some(&handle) {
            self.state.minted_token = None;
        }
        vec![SessionEffect::DestroyToken { handle }]
    }

    fn connect(&mut self, id: PublicIdentifier) -> Vec<SessionEffect> {
        info!(identity = %id, "identity connected");
        self.state.generation += 1;
        self.state.connection_epoch += 1;
        self.state.clear_run(self.timings.hiatus_countdown);
        self.state.pending_expiry = None;
        self.state.identity = Some(id);
        self.start_run();
        vec![SessionEffect::CancelTimers(TimerScope::All)]
    }

    fn disconnect(&mut self) -> Vec<SessionEffect> {
        info!("identity disconnected");
        self.state.generation += 1;
        self.state.connection_epoch += 1;
        self.state.clear_run(self.timings.hiatus_countdown);
        self.state.pending_expiry = None;
        self.state.identity = None;
        self.state.display_text = messages::DISCONNECTED.to_owned();
        self.enter(Stage::Disconnected);
        vec![SessionEffect::CancelTimers(TimerScope::All)]
    }

    /// Picks a fresh narrative entry and waits for `awaken`.
    fn start_run(&mut self) {
        let entry = select_entry(&self.store, self.rng.as_mut()).clone();
        debug!(narrative = %entry.id, "narrative entry selected");
        self.state.narrative = Some(entry);
        if let Some(id) = &self.state.identity {
            self.state.display_text = messages::identity_acknowledged(id);
        }
        self.enter(Stage::AwaitingAwaken);
    }

    fn awaken(&mut self) -> Vec<SessionEffect> {
        if self.state.signature_pending {
            debug!("attestation already pending");
            return Vec::new();
        }
        self.state.signature_pending = true;
        self.state.display_text = messages::SYNCHRONIZING.to_owned();
        vec![SessionEffect::RequestSignature {
            message: messages::ATTESTATION.to_vec(),
            ticket: self.state.ticket(),
        }]
    }

    fn choose(&mut self, branch: Branch) -> Vec<SessionEffect> {
        let Some(entry) = self.state.narrative.as_ref() else {
            self.state.append(messages::UNKNOWN_COMMAND);
            return Vec::new();
        };
        let revelation = entry.revelation(branch).to_owned();
        let request = self.issue_request(&revelation, &entry.id);
        let ticket = self.state.ticket();

        self.enter(Stage::Revelation);
        self.state.glitching = true;
        self.state.display_text = format!("{revelation}{}", messages::TOKEN_CREATING);

        vec![
            SessionEffect::ScheduleOnce {
                kind: TimerKind::GlitchFlash,
                after: self.timings.glitch_flash,
                ticket,
            },
            SessionEffect::ScheduleOnce {
                kind: TimerKind::HiatusEntry,
                after: self.timings.hiatus_delay,
                ticket,
            },
            SessionEffect::IssueToken { request, ticket },
        ]
    }

    fn enter_hiatus(&mut self) -> Vec<SessionEffect> {
        self.enter(Stage::Hiatus);
        self.state.glitching = false;
        self.state.hiatus_countdown = self.timings.hiatus_countdown;
        self.state.poetic_echo =
            pick_uniform(POETIC_ECHOES, self.rng.as_mut()).map(|echo| (*echo).to_owned());
        vec![
            SessionEffect::CancelTimer(TimerKind::GlitchFlash),
            SessionEffect::ScheduleRepeating {
                kind: TimerKind::HiatusTick,
                period: self.timings.hiatus_tick,
                ticket: self.state.ticket(),
            },
        ]
    }

    fn tick(&mut self) -> Vec<SessionEffect> {
        self.state.hiatus_countdown = self.state.hiatus_countdown.saturating_sub(1);
        if self.state.hiatus_countdown > 0 {
            return Vec::new();
        }
        let mut effects = vec![SessionEffect::CancelTimer(TimerKind::HiatusTick)];
        effects.extend(self.reset());
        effects
    }

    /// Ends the hiatus. The token expiry survives: it belongs to the token.
    fn reset(&mut self) -> Vec<SessionEffect> {
        self.state.generation += 1;
        self.state.clear_run(self.timings.hiatus_countdown);
        if self.state.identity.is_some() {
            self.start_run();
        } else {
            self.state.display_text = messages::DISCONNECTED.to_owned();
            self.enter(Stage::Disconnected);
        }
        vec![SessionEffect::CancelTimers(TimerScope::Stage)]
    }

    /// Arms the expiry of `handle`. At most one expiry is armed: if another
    /// token's expiry is still pending, it is replaced and that token is
    /// destroyed right away, so its lifetime ends short of the full
    /// `token_lifetime`.
    fn arm_expiry(&mut self, handle: TokenHandle, effects: &mut Vec<SessionEffect>) {
        if let Some(previous) = self.state.pending_expiry.replace(handle.clone()) {
            if self.state.minted_token.as_ref() == Some(&previous) {
                self.state.minted_token = None;
            }
            effects.push(SessionEffect::DestroyToken { handle: previous });
        }
        effects.push(SessionEffect::ScheduleTokenExpiry {
            handle,
            after: self.timings.token_lifetime,
        });
    }

    fn issue_request(&self, revelation: &str, narrative_id: &str) -> IssueRequest {
        IssueRequest {
            name: self.template.name.clone(),
            symbol: self.template.symbol.clone(),
            uri: self.template.uri.clone(),
            metadata: serde_json::json!({
                "revelation": revelation,
                "narrative_id": narrative_id,
                "owner": self.state.identity.as_ref().map(PublicIdentifier::as_str),
                "issued_at": self.clock.timestamp(),
                "seller_fee_basis_points": self.template.seller_fee_basis_points,
            }),
        }
    }

    fn enter(&mut self, stage: Stage) {
        if self.state.stage != stage {
            info!(from = self.state.stage.name(), to = stage.name(), "stage transition");
        }
        self.state.stage = stage;
    }
}
