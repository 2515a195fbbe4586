//! Plain-text rendering of the session view.

use bindu_session::application::query_handlers::SessionView;
use bindu_session::domain::messages;
use bindu_session::domain::stage::Stage;
use serde_json::{Value, json};

use crate::wallet::LocalWallet;

/// Marker printed above the display text while the glitch flag is raised.
pub const GLITCH_MARKER: &str = "░▒▓█▓▒░";

/// Prompt printed when the session accepts input.
pub const PROMPT: &str = "> ";

/// Renders `view` as the text block printed after every change.
///
/// During a hiatus the poetic echo and the countdown replace the display
/// text. The prompt is only offered when the stage accepts input.
#[must_use]
pub fn render(view: &SessionView) -> String {
    let mut out = String::new();
    if view.glitching {
        out.push_str(GLITCH_MARKER);
        out.push('\n');
    }

    if view.stage == Stage::Hiatus {
        if let Some(echo) = &view.poetic_echo {
            out.push_str(echo);
            out.push('\n');
        }
        out.push_str(&messages::hiatus_countdown(view.hiatus_countdown));
    } else {
        out.push_str(&view.display_text);
    }

    out.push('\n');
    if view.accepts_input {
        out.push_str(PROMPT);
    }
    out
}

/// Builds the `/state` report: the session view next to the local wallet's
/// connection and approval settings.
///
/// # Errors
///
/// Returns an error if the view cannot be serialized.
pub fn state_report(
    view: &SessionView,
    wallet: &LocalWallet,
) -> Result<Value, serde_json::Error> {
    let status = wallet.status();
    Ok(json!({
        "session": serde_json::to_value(view)?,
        "wallet": {
            "connected": status.is_connected(),
            "public_identifier": status.public_identifier().map(|id| id.as_str().to_owned()),
            "approves_signatures": wallet.approves(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(stage: Stage) -> SessionView {
        SessionView {
            stage,
            accepts_input: stage.accepts_input(),
            display_text: "Le Bindu attend.".into(),
            glitching: false,
            hiatus_countdown: 20,
            poetic_echo: None,
            public_identifier: Some("initie".into()),
            narrative_id: Some("MYTHE_CODEUR".into()),
            minted_token: None,
        }
    }

    #[test]
    fn test_prompt_offered_only_when_input_accepted() {
        assert_eq!(render(&view(Stage::AwaitingAwaken)), "Le Bindu attend.\n> ");
        assert_eq!(render(&view(Stage::Revelation)), "Le Bindu attend.\n");
        assert_eq!(render(&view(Stage::Disconnected)), "Le Bindu attend.\n");
    }

    #[test]
    fn test_hiatus_shows_echo_and_countdown() {
        let mut hiatus = view(Stage::Hiatus);
        hiatus.poetic_echo = Some("Le silence se souvient.".into());
        hiatus.hiatus_countdown = 7;

        assert_eq!(render(&hiatus), "Le silence se souvient.\n[...7s...]\n");
    }

    #[test]
    fn test_state_report_includes_wallet_settings() {
        // Arrange
        let wallet = LocalWallet::new();
        wallet.connect("initie");
        wallet.set_approve(false);

        // Act
        let report = state_report(&view(Stage::AwaitingAwaken), &wallet).unwrap();

        // Assert
        assert_eq!(report["session"]["stage"], "awaiting_awaken");
        assert_eq!(report["wallet"]["connected"], true);
        assert_eq!(report["wallet"]["public_identifier"], "initie");
        assert_eq!(report["wallet"]["approves_signatures"], false);
    }

    #[test]
    fn test_state_report_for_disconnected_wallet() {
        let wallet = LocalWallet::new();

        let report = state_report(&view(Stage::Disconnected), &wallet).unwrap();

        assert_eq!(report["wallet"]["connected"], false);
        assert!(report["wallet"]["public_identifier"].is_null());
    }

    #[test]
    fn test_glitch_marker_precedes_text() {
        let mut revelation = view(Stage::Revelation);
        revelation.glitching = true;

        assert!(render(&revelation).starts_with(GLITCH_MARKER));
    }
}
