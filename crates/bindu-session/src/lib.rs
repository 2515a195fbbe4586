//! Bindu terminal — Session state machine.
//!
//! Responsible for sequencing user commands, identity changes, timer
//! expiries and capability completions into stage transitions, and for
//! exposing a read-only view of the session to the presentation layer.

pub mod application;
pub mod domain;
