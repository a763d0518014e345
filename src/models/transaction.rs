// ============================================================================
// Structure : Transaction
// ============================================================================
// Un mouvement sur le compte (dépôt, retrait, investissement, gains)
//
// CONCEPTS RUST :
// 1. Enums fermés : le compilateur garantit qu'on gère tous les types
// 2. #[serde(rename = "type")] : "type" est un mot-clé Rust, on le renomme
// 3. Immutabilité : aucune méthode &mut self, une transaction ne change pas
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type de transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Investment,
    Earnings,
}

impl TransactionKind {
    /// Retourne true si la transaction crédite le compte
    ///
    /// CONCEPT : Règle d'affichage uniquement
    /// - Deposit et Earnings : affichés en "+" (vert)
    /// - Withdrawal et Investment : affichés en "-" (rouge)
    /// - Le solde n'est jamais recalculé à partir de ça
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::Earnings)
    }

    /// Signe affiché devant le montant
    pub fn sign(&self) -> char {
        if self.is_credit() {
            '+'
        } else {
            '-'
        }
    }
}

/// Statut de traitement d'une transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Ausstehend",
            TransactionStatus::Completed => "Abgeschlossen",
            TransactionStatus::Failed => "Fehlgeschlagen",
        }
    }
}

/// Transaction du compte
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,

    /// Type de mouvement (champ "type" dans le JSON)
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Montant, toujours positif (le signe vient de `kind`)
    pub amount: Decimal,

    /// Code devise ISO (ex: "EUR")
    pub currency: String,

    pub status: TransactionStatus,
    pub date: DateTime<Utc>,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_kinds() {
        assert!(TransactionKind::Deposit.is_credit());
        assert!(TransactionKind::Earnings.is_credit());
        assert!(!TransactionKind::Withdrawal.is_credit());
        assert!(!TransactionKind::Investment.is_credit());

        assert_eq!(TransactionKind::Deposit.sign(), '+');
        assert_eq!(TransactionKind::Investment.sign(), '-');
    }

    #[test]
    fn test_transaction_json_uses_type_field() {
        let json = r#"{
            "id": "7",
            "type": "withdrawal",
            "amount": 1250.5,
            "currency": "EUR",
            "status": "pending",
            "date": "2024-04-02T00:00:00Z",
            "description": "Auszahlung"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionKind::Withdrawal);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.amount, Decimal::new(12505, 1));
    }
}
