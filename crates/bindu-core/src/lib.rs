//! Bindu Core — shared abstractions.
//!
//! This crate defines the seams every other crate depends on: time,
//! randomness, the identity and token-issuer capabilities, and the domain
//! error taxonomy. It contains no session logic.

pub mod clock;
pub mod command;
pub mod error;
pub mod identity;
pub mod issuer;
pub mod rng;
