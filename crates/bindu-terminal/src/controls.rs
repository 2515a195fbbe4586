//! Terminal control lines.
//!
//! Lines starting with `/` drive the local wallet and the terminal itself;
//! everything else is narrative input for the session.

/// A parsed control line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Connect the wallet, optionally as a specific identifier.
    Connect(Option<String>),
    /// Disconnect the wallet.
    Disconnect,
    /// Approve later signature requests.
    Approve,
    /// Decline later signature requests.
    Decline,
    /// Print the session view as JSON.
    State,
    /// Leave the terminal.
    Quit,
    /// A `/` line naming no known control.
    Unknown(String),
}

/// Parses `line` as a control, or returns `None` for narrative input.
#[must_use]
pub fn parse_control(line: &str) -> Option<Control> {
    let rest = line.trim().strip_prefix('/')?;
    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default().to_lowercase();

    let control = match name.as_str() {
        "connect" => Control::Connect(words.next().map(str::to_owned)),
        "disconnect" => Control::Disconnect,
        "approve" => Control::Approve,
        "decline" => Control::Decline,
        "state" => Control::State,
        "quit" | "exit" => Control::Quit,
        _ => Control::Unknown(rest.to_owned()),
    };
    Some(control)
}

/// Help line printed at startup.
pub const HELP: &str =
    "/connect [id] · /disconnect · /approve · /decline · /state · /quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrative_input_is_not_a_control() {
        assert_eq!(parse_control("awaken"), None);
        assert_eq!(parse_control("  1 "), None);
    }

    #[test]
    fn test_connect_with_and_without_identifier() {
        assert_eq!(parse_control("/connect"), Some(Control::Connect(None)));
        assert_eq!(
            parse_control(" /connect 9xQe "),
            Some(Control::Connect(Some("9xQe".into())))
        );
    }

    #[test]
    fn test_control_names_are_case_insensitive() {
        assert_eq!(parse_control("/DECLINE"), Some(Control::Decline));
        assert_eq!(parse_control("/Quit"), Some(Control::Quit));
        assert_eq!(parse_control("/state"), Some(Control::State));
    }

    #[test]
    fn test_unknown_control_keeps_its_text() {
        assert_eq!(
            parse_control("/mint now"),
            Some(Control::Unknown("mint now".into()))
        );
        assert_eq!(parse_control("/"), Some(Control::Unknown(String::new())));
    }
}
