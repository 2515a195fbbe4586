//! Bindu terminal — wiring and adapters for the interactive front end.
//!
//! Provides the local wallet identity provider, the in-memory token ledger,
//! environment configuration, control-line parsing and text rendering of
//! the session view.

pub mod config;
pub mod controls;
pub mod error;
pub mod ledger;
pub mod render;
pub mod wallet;
