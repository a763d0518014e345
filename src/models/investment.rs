// ============================================================================
// Structure : Investment
// ============================================================================
// Un placement de l'utilisateur (pool de minage, staking, etc.)
//
// Aucune transition de statut n'est implémentée : les placements de démo sont
// statiques. current_value est attendu >= amount tant que le placement est actif.
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Statut d'un placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStatus {
    Active,
    Completed,
}

impl InvestmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentStatus::Active => "Aktiv",
            InvestmentStatus::Completed => "Abgeschlossen",
        }
    }
}

/// Placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub name: String,

    /// Capital investi
    pub amount: Decimal,

    /// Rendement en pourcentage (ex: 12.5 pour 12,5 %)
    pub return_rate: Decimal,

    /// Durée en texte libre (ex: "12 months")
    pub duration: String,

    pub status: InvestmentStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    /// Valeur actuelle du placement
    pub current_value: Decimal,
}

impl Investment {
    /// Gain latent : valeur actuelle - capital
    pub fn unrealized_gain(&self) -> Decimal {
        self.current_value - self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unrealized_gain() {
        let investment = Investment {
            id: "1".to_string(),
            name: "Bitcoin Mining Pool".to_string(),
            amount: dec!(500000),
            return_rate: dec!(12.5),
            duration: "12 months".to_string(),
            status: InvestmentStatus::Active,
            start_date: Utc::now(),
            end_date: Utc::now(),
            current_value: dec!(562500),
        };

        assert_eq!(investment.unrealized_gain(), dec!(62500));
    }
}
