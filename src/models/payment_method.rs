// ============================================================================
// Enum : PaymentMethod
// ============================================================================
// Les moyens de paiement proposés dans les formulaires de dépôt/retrait
//
// CONCEPT RUST : Enum + tableau constant
// - PaymentMethod::ALL liste les 13 variantes dans l'ordre d'affichage
// - next()/previous() cyclent dans ce tableau (comme Interval::next)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Moyen de paiement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Bitcoin,
    Ethereum,
    Usdt,
    Usdc,
    Bnb,
    Cardano,
    Solana,
    Ripple,
    Polkadot,
    Dogecoin,
    Bank,
    Pix,
    Paypal,
}

impl PaymentMethod {
    /// Toutes les méthodes, dans l'ordre du sélecteur
    pub const ALL: [PaymentMethod; 13] = [
        PaymentMethod::Bitcoin,
        PaymentMethod::Ethereum,
        PaymentMethod::Usdt,
        PaymentMethod::Usdc,
        PaymentMethod::Bnb,
        PaymentMethod::Cardano,
        PaymentMethod::Solana,
        PaymentMethod::Ripple,
        PaymentMethod::Polkadot,
        PaymentMethod::Dogecoin,
        PaymentMethod::Bank,
        PaymentMethod::Pix,
        PaymentMethod::Paypal,
    ];

    /// Valeur transmise au provider (ex: "bitcoin")
    pub fn value(&self) -> &'static str {
        match self {
            PaymentMethod::Bitcoin => "bitcoin",
            PaymentMethod::Ethereum => "ethereum",
            PaymentMethod::Usdt => "usdt",
            PaymentMethod::Usdc => "usdc",
            PaymentMethod::Bnb => "bnb",
            PaymentMethod::Cardano => "cardano",
            PaymentMethod::Solana => "solana",
            PaymentMethod::Ripple => "ripple",
            PaymentMethod::Polkadot => "polkadot",
            PaymentMethod::Dogecoin => "dogecoin",
            PaymentMethod::Bank => "bank",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Paypal => "paypal",
        }
    }

    /// Libellé affiché
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Bitcoin => "Bitcoin (BTC)",
            PaymentMethod::Ethereum => "Ethereum (ETH)",
            PaymentMethod::Usdt => "Tether (USDT)",
            PaymentMethod::Usdc => "USD Coin (USDC)",
            PaymentMethod::Bnb => "Binance Coin (BNB)",
            PaymentMethod::Cardano => "Cardano (ADA)",
            PaymentMethod::Solana => "Solana (SOL)",
            PaymentMethod::Ripple => "Ripple (XRP)",
            PaymentMethod::Polkadot => "Polkadot (DOT)",
            PaymentMethod::Dogecoin => "Dogecoin (DOGE)",
            PaymentMethod::Bank => "Banküberweisung",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Paypal => "PayPal",
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Méthode suivante (Paypal → Bitcoin)
    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Méthode précédente (Bitcoin → Paypal)
    pub fn previous(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_methods_with_unique_values() {
        assert_eq!(PaymentMethod::ALL.len(), 13);
        let mut values: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.value()).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), 13);
    }

    #[test]
    fn test_cycle_wraps_around() {
        assert_eq!(PaymentMethod::Paypal.next(), PaymentMethod::Bitcoin);
        assert_eq!(PaymentMethod::Bitcoin.previous(), PaymentMethod::Paypal);
        assert_eq!(PaymentMethod::Bitcoin.next(), PaymentMethod::Ethereum);
    }

    #[test]
    fn test_serde_value_matches_value() {
        let json = serde_json::to_string(&PaymentMethod::Bank).unwrap();
        assert_eq!(json, "\"bank\"");
    }
}
