//! Bindu terminal — Narrative content.
//!
//! Responsible for the immutable table of micro-myths, uniform selection of
//! an entry each time a session (re)starts, and the poetic echoes shown
//! during a hiatus.

pub mod application;
pub mod content;
pub mod domain;
