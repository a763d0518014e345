// ============================================================================
// Structure : UserProfile
// ============================================================================
// Le profil de l'utilisateur connecté et ses totaux en EUR
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Profil utilisateur
///
/// Tous les montants sont en EUR et non négatifs.
/// CONCEPT : #[serde(rename_all = "camelCase")]
/// - total_invested (Rust) <-> totalInvested (JSON)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,

    /// Solde disponible
    pub balance: Decimal,

    /// Total investi
    pub total_invested: Decimal,

    /// Total des gains
    pub total_earnings: Decimal,

    /// Compte vérifié (KYC)
    pub is_verified: bool,

    pub created_at: DateTime<Utc>,
}
