//! Commands accepted by the session.

use bindu_core::command::Command;
use bindu_narrative::domain::entry::Branch;
use uuid::Uuid;

/// Raw text submitted by the presentation layer.
#[derive(Debug, Clone)]
pub struct SubmitCommand {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The text as typed.
    pub text: String,
}

impl SubmitCommand {
    /// Wraps `text` with a fresh correlation ID.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            text: text.into(),
        }
    }

    /// Interprets the submitted text.
    #[must_use]
    pub fn parse(&self) -> ParsedCommand {
        ParsedCommand::parse(&self.text)
    }
}

impl Command for SubmitCommand {
    fn command_type(&self) -> &'static str {
        "session.submit_command"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Interpretation of a submitted command, independent of the current stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// `awaken`
    Awaken,
    /// `1` or `2`
    Choose(Branch),
    /// Anything else, normalized.
    Unrecognized(String),
}

impl ParsedCommand {
    /// Parses text after trimming surrounding whitespace and lowercasing.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let normalized = text.trim().to_lowercase();
        match normalized.as_str() {
            "awaken" => Self::Awaken,
            "1" => Self::Choose(Branch::A),
            "2" => Self::Choose(Branch::B),
            _ => Self::Unrecognized(normalized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(ParsedCommand::parse("  AWAKEN \n"), ParsedCommand::Awaken);
        assert_eq!(ParsedCommand::parse(" 1"), ParsedCommand::Choose(Branch::A));
        assert_eq!(ParsedCommand::parse("2 "), ParsedCommand::Choose(Branch::B));
    }

    #[test]
    fn test_parse_keeps_unrecognized_text() {
        assert_eq!(
            ParsedCommand::parse(" Hello "),
            ParsedCommand::Unrecognized("hello".to_owned())
        );
        assert_eq!(
            ParsedCommand::parse(""),
            ParsedCommand::Unrecognized(String::new())
        );
        assert_eq!(
            ParsedCommand::parse("12"),
            ParsedCommand::Unrecognized("12".to_owned())
        );
    }

    #[test]
    fn test_submit_command_reports_type_and_correlation() {
        let command = SubmitCommand::new("awaken");
        assert_eq!(command.command_type(), "session.submit_command");
        assert_eq!(Command::correlation_id(&command), command.correlation_id);
        assert_eq!(command.parse(), ParsedCommand::Awaken);
    }
}
