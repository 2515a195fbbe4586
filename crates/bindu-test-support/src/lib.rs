//! Shared test doubles for the Bindu terminal.

mod clock;
mod identity;
mod issuer;
mod rng;

pub use clock::FixedClock;
pub use identity::ScriptedIdentity;
pub use issuer::{FailingTokenIssuer, RecordingTokenIssuer, UndestroyableTokenIssuer};
pub use rng::{MockRng, SequenceRng};
