//! Terminal texts.

use std::time::Duration;

use bindu_core::identity::PublicIdentifier;

/// Shown before any identity connects.
pub const CONNECT_PROMPT: &str = "Connectez votre portefeuille pour commencer...";

/// Shown when the identity disconnects.
pub const DISCONNECTED: &str = "Portefeuille déconnecté...";

/// Shown while the attestation signature is pending.
pub const SYNCHRONIZING: &str = "Synchronisation avec le Spectre...";

/// Shown when the attestation signature is declined.
pub const SYNCHRONIZATION_REJECTED: &str = "Synchronisation rejetée...";

/// Appended when a command is not valid for the current stage.
pub const UNKNOWN_COMMAND: &str = "\n> Commande inconnue.";

/// Appended to the revelation while the token is being created.
pub const TOKEN_CREATING: &str = "\n\n[Création de l'empreinte mystique on-chain...]";

/// Appended when token creation fails.
pub const TOKEN_FAILED: &str = "\n[Échec de la création de l'empreinte...]";

/// Message signed to attest the awakening.
pub const ATTESTATION: &[u8] = "Je suis l'Initié. J'éveille le Bindu.".as_bytes();

/// Acknowledges a connected identity and prompts for `awaken`.
#[must_use]
pub fn identity_acknowledged(id: &PublicIdentifier) -> String {
    format!("Empreinte spectrale détectée : {id}\n> Tapez 'awaken'...")
}

/// Appended once the token exists, announcing its lifetime.
#[must_use]
pub fn token_created(lifetime: Duration) -> String {
    format!(
        "\n[Empreinte créée. Durée de vie : {} secondes...]",
        lifetime.as_secs()
    )
}

/// Countdown line shown during a hiatus.
#[must_use]
pub fn hiatus_countdown(seconds: u32) -> String {
    format!("[...{seconds}s...]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledgement_embeds_identifier() {
        let text = identity_acknowledged(&PublicIdentifier::new("9xQe"));
        assert!(text.contains("9xQe"));
        assert!(text.ends_with("> Tapez 'awaken'..."));
    }

    #[test]
    fn test_token_created_announces_lifetime() {
        assert_eq!(
            token_created(Duration::from_secs(20)),
            "\n[Empreinte créée. Durée de vie : 20 secondes...]"
        );
    }

    #[test]
    fn test_hiatus_countdown_format() {
        assert_eq!(hiatus_countdown(20), "[...20s...]");
    }
}
