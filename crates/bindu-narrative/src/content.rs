//! Bundled narrative content.

use bindu_core::error::DomainError;

use crate::domain::entry::NarrativeEntry;
use crate::domain::store::NarrativeStore;

/// Lines shown, one at a time, while the terminal rests in a hiatus.
pub const POETIC_ECHOES: &[&str] = &[
    "Le courant ne s'arrête jamais.",
    "Seul le changement demeure.",
    "Ici. Maintenant. Puis plus rien.",
    "Une ondulation dans le spectre.",
    "La fin est un autre commencement.",
    "Observer sans retenir.",
    "Vide, mais plein de potentiel.",
];

/// The two micro-myths shipped with the terminal.
///
/// # Errors
///
/// Propagates the store's startup invariant check.
pub fn bundled_store() -> Result<NarrativeStore, DomainError> {
    NarrativeStore::new(vec![
        NarrativeEntry {
            id: "MYTHE_CODEUR".to_owned(),
            invocation: "Synchronisation réussie. Un engrenage de lumière ASCII grince..."
                .to_owned(),
            trial: "L'Écho du Codeur vous murmure : \"...\"\n> Tapez 1 (Algorithme) ou 2 (Intuition)."
                .to_owned(),
            revelation_a: "Le code s'assemble en une symétrie parfaite et glaciale...".to_owned(),
            revelation_b: "Une ligne de code s'efface, remplacée par un glitch poétique..."
                .to_owned(),
        },
        NarrativeEntry {
            id: "MYTHE_SECRET".to_owned(),
            invocation: "Synchronisation validée. Le Yantra-Moteur ralentit...".to_owned(),
            trial: "Le savoir peut être libéré, accessible à tous, ou protégé...\n> Tapez 1 (Libérer) ou 2 (Protéger)."
                .to_owned(),
            revelation_a: "Le nœud s'ouvre. Le savoir se répand comme de l'encre dans l'eau..."
                .to_owned(),
            revelation_b: "Le nœud se resserre. Le secret est préservé...".to_owned(),
        },
    ])
}
