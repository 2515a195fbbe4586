//! Side effects requested by the state machine.
//!
//! Transition handlers never touch timers or capabilities directly; they
//! return effects and the runtime executes them in order.

use std::time::Duration;

use bindu_core::issuer::{IssueRequest, TokenHandle};

use crate::domain::state::Ticket;

/// Stage-scoped timers. Token expiry is tracked separately because it
/// belongs to the token, not to a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Lowers the glitch flag after a choice.
    GlitchFlash,
    /// Moves a revelation into the hiatus.
    HiatusEntry,
    /// Repeating countdown tick during the hiatus.
    HiatusTick,
}

/// Which timers a cancellation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerScope {
    /// Every stage-scoped timer.
    Stage,
    /// Stage-scoped timers and the token expiry.
    All,
}

/// An effect for the runtime to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Abort timers in `scope`.
    CancelTimers(TimerScope),
    /// Abort one stage-scoped timer.
    CancelTimer(TimerKind),
    /// Fire `kind` once after `after`.
    ScheduleOnce {
        /// Timer to arm.
        kind: TimerKind,
        /// Delay before firing.
        after: Duration,
        /// Session the timer belongs to.
        ticket: Ticket,
    },
    /// Fire `kind` every `period`, first after one period.
    ScheduleRepeating {
        /// Timer to arm.
        kind: TimerKind,
        /// Interval between firings.
        period: Duration,
        /// Session the timer belongs to.
        ticket: Ticket,
    },
    /// Ask the identity provider to sign `message`.
    RequestSignature {
        /// Bytes to sign.
        message: Vec<u8>,
        /// Session the request belongs to.
        ticket: Ticket,
    },
    /// Ask the issuer to create a token.
    IssueToken {
        /// Issue context.
        request: IssueRequest,
        /// Session the request belongs to.
        ticket: Ticket,
    },
    /// Arm the expiry timer for `handle`, replacing any armed one.
    ScheduleTokenExpiry {
        /// Token to destroy on expiry.
        handle: TokenHandle,
        /// Remaining lifetime.
        after: Duration,
    },
    /// Destroy `handle`, fire-and-forget.
    DestroyToken {
        /// Token to destroy.
        handle: TokenHandle,
    },
}
