//! Tokio runtime for the session state machine.
//!
//! One task owns the `SessionMachine` and processes events strictly one at
//! a time: identity status changes, submitted commands, timer expiries and
//! capability completions. Timers and capability calls run in their own
//! tasks and report back through an internal channel, tagged with the
//! ticket of the session that started them.

use std::sync::Arc;
use std::time::Duration;

use bindu_core::command::Command;
use bindu_core::error::DomainError;
use bindu_core::identity::{IdentityProvider, IdentityStatus, Signature};
use bindu_core::issuer::{IssueRequest, TokenHandle, TokenIssuer};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at, sleep};
use tracing::{debug, info, instrument, warn};

use crate::application::command_handlers::SessionMachine;
use crate::application::effects::{SessionEffect, TimerKind};
use crate::application::query_handlers::{SessionView, session_view};
use crate::application::timers::TimerSet;
use crate::domain::commands::SubmitCommand;
use crate::domain::state::Ticket;

/// Completions reported back to the session task.
#[derive(Debug)]
enum RuntimeEvent {
    TimerFired {
        kind: TimerKind,
        ticket: Ticket,
    },
    SignatureResolved {
        ticket: Ticket,
        result: Result<Signature, DomainError>,
    },
    IssueResolved {
        ticket: Ticket,
        result: Result<TokenHandle, DomainError>,
    },
    TokenExpired {
        handle: TokenHandle,
    },
}

/// Presentation-side handle to a running session.
#[derive(Debug)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SubmitCommand>,
    view: watch::Receiver<SessionView>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Submits raw command text. The sole mutation entry point besides
    /// identity changes and timers.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionClosed` if the session task has stopped.
    pub fn submit_command(&self, text: impl Into<String>) -> Result<(), DomainError> {
        self.commands
            .send(SubmitCommand::new(text))
            .map_err(|_| DomainError::SessionClosed)
    }

    /// Returns the latest view.
    #[must_use]
    pub fn view(&self) -> SessionView {
        self.view.borrow().clone()
    }

    /// Subscribes to view changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view.clone()
    }

    /// Stops the session, cancelling every outstanding timer, and waits for
    /// the task to finish.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the session task panicked.
    pub async fn shutdown(self) -> Result<(), DomainError> {
        drop(self.commands);
        self.task
            .await
            .map_err(|e| DomainError::Infrastructure(format!("session task failed: {e}")))
    }
}

/// Spawns the session task on the current tokio runtime.
#[must_use]
pub fn spawn_session(
    machine: SessionMachine,
    identity: Arc<dyn IdentityProvider>,
    issuer: Arc<dyn TokenIssuer>,
) -> SessionHandle {
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = watch::channel(session_view(machine.state()));

    let runtime = SessionRuntime {
        machine,
        identity,
        issuer,
        timers: TimerSet::default(),
        events: events_tx,
        view: view_tx,
    };
    let task = tokio::spawn(runtime.run(commands_rx, events_rx));

    SessionHandle {
        commands: commands_tx,
        view: view_rx,
        task,
    }
}

struct SessionRuntime {
    machine: SessionMachine,
    identity: Arc<dyn IdentityProvider>,
    issuer: Arc<dyn TokenIssuer>,
    timers: TimerSet,
    events: mpsc::UnboundedSender<RuntimeEvent>,
    view: watch::Sender<SessionView>,
}

impl SessionRuntime {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<SubmitCommand>,
        mut events: mpsc::UnboundedReceiver<RuntimeEvent>,
    ) {
        let mut status = self.identity.subscribe();
        let initial = status.borrow_and_update().clone();
        self.on_identity(&initial);
        let mut identity_open = true;

        loop {
            tokio::select! {
                changed = status.changed(), if identity_open => {
                    let current = if changed.is_ok() {
                        status.borrow_and_update().clone()
                    } else {
                        warn!("identity provider went away; treating as disconnected");
                        identity_open = false;
                        IdentityStatus::Disconnected
                    };
                    self.on_identity(&current);
                }
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    self.on_command(&command);
                }
                Some(event) = events.recv() => self.on_event(event),
            }
        }

        info!("session stopped");
    }

    fn on_identity(&mut self, status: &IdentityStatus) {
        let effects = self.machine.handle_identity_changed(status);
        self.execute(effects);
    }

    #[instrument(
        skip_all,
        fields(
            command = command.command_type(),
            correlation_id = %command.correlation_id,
            generation = self.machine.state().ticket().generation,
        )
    )]
    fn on_command(&mut self, command: &SubmitCommand) {
        let effects = self.machine.handle_command(command);
        self.execute(effects);
    }

    #[instrument(skip_all, fields(generation = self.machine.state().ticket().generation))]
    fn on_event(&mut self, event: RuntimeEvent) {
        let effects = match event {
            RuntimeEvent::TimerFired { kind, ticket } => self.machine.handle_timer(kind, ticket),
            RuntimeEvent::SignatureResolved { ticket, result } => {
                self.machine.handle_signature_result(ticket, result)
            }
            RuntimeEvent::IssueResolved { ticket, result } => {
                self.machine.handle_issue_result(ticket, result)
            }
            RuntimeEvent::TokenExpired { handle } => self.machine.handle_token_expired(handle),
        };
        self.execute(effects);
    }

    /// Carries out `effects` in order, then publishes the new view.
    fn execute(&mut self, effects: Vec<SessionEffect>) {
        for effect in effects {
            match effect {
                SessionEffect::CancelTimers(scope) => self.timers.cancel_scope(scope),
                SessionEffect::CancelTimer(kind) => self.timers.cancel(kind),
                SessionEffect::ScheduleOnce {
                    kind,
                    after,
                    ticket,
                } => {
                    let task = self.spawn_once(after, RuntimeEvent::TimerFired { kind, ticket });
                    self.timers.arm(kind, task);
                }
                SessionEffect::ScheduleRepeating {
                    kind,
                    period,
                    ticket,
                } => {
                    let task = self.spawn_repeating(kind, period, ticket);
                    self.timers.arm(kind, task);
                }
                SessionEffect::RequestSignature { message, ticket } => {
                    self.request_signature(message, ticket);
                }
                SessionEffect::IssueToken { request, ticket } => {
                    self.issue_token(request, ticket);
                }
                SessionEffect::ScheduleTokenExpiry { handle, after } => {
                    let task = self.spawn_once(after, RuntimeEvent::TokenExpired { handle });
                    self.timers.arm_expiry(task);
                }
                SessionEffect::DestroyToken { handle } => self.destroy_token(handle),
            }
        }
        self.publish();
    }

    fn publish(&self) {
        let next = session_view(self.machine.state());
        self.view.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    fn spawn_once(&self, after: Duration, event: RuntimeEvent) -> JoinHandle<()> {
        let events = self.events.clone();
        tokio::spawn(async move {
            sleep(after).await;
            let _ = events.send(event);
        })
    }

    fn spawn_repeating(&self, kind: TimerKind, period: Duration, ticket: Ticket) -> JoinHandle<()> {
        let events = self.events.clone();
        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if events.send(RuntimeEvent::TimerFired { kind, ticket }).is_err() {
                    break;
                }
            }
        })
    }

    /// The request is abandoned, not aborted, when the session moves on;
    /// its completion is dropped by ticket.
    fn request_signature(&self, message: Vec<u8>, ticket: Ticket) {
        let identity = Arc::clone(&self.identity);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = identity.sign_message(&message).await;
            let _ = events.send(RuntimeEvent::SignatureResolved { ticket, result });
        });
    }

    fn issue_token(&self, request: IssueRequest, ticket: Ticket) {
        let issuer = Arc::clone(&self.issuer);
        let events = self.events.clone();
        debug!(name = %request.name, "dispatching token issue");
        tokio::spawn(async move {
            let result = issuer.issue(request).await;
            let _ = events.send(RuntimeEvent::IssueResolved { ticket, result });
        });
    }

    fn destroy_token(&self, handle: TokenHandle) {
        let issuer = Arc::clone(&self.issuer);
        tokio::spawn(async move {
            info!(%handle, "destroying ephemeral token");
            match issuer.destroy(&handle).await {
                Ok(()) => info!(%handle, "ephemeral token destroyed"),
                Err(e) => warn!(%handle, error = %e, "ephemeral token destruction failed"),
            }
        });
    }
}
