// ============================================================================
// Structure : Outcome
// ============================================================================
// Résultat d'une opération d'écriture (dépôt, retrait)
//
// CONCEPT : Résultat métier vs erreur technique
// - Outcome { success: false } : refus métier, affiché tel quel
// - Err(anyhow::Error) : panne technique, affichée avec un message générique
// ============================================================================

use serde::{Deserialize, Serialize};

/// Résultat `{success, message}` d'une opération d'écriture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
