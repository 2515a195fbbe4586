//! Application layer for the session state machine.

pub mod command_handlers;
pub mod effects;
pub mod query_handlers;
pub mod runtime;
mod timers;
