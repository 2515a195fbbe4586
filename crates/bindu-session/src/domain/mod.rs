//! Domain layer for the session state machine.

pub mod commands;
pub mod messages;
pub mod stage;
pub mod state;
pub mod timings;
