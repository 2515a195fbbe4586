//! Commands entering a session from the presentation layer.

use uuid::Uuid;

/// A user-originated request. Its identity fields become span fields on
/// the handler that processes it.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable dotted name, e.g. `session.submit_command`.
    fn command_type(&self) -> &'static str;

    /// Identifier carried through every log line and effect the command
    /// causes.
    fn correlation_id(&self) -> Uuid;
}
