// ============================================================================
// Fixtures : données de démonstration
// ============================================================================
// Jeu de données statique qui remplace une vraie base de données.
// Les fonctions renvoient des valeurs neuves à chaque appel : personne ne
// peut modifier les fixtures.
// ============================================================================

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    Investment, InvestmentStatus, Transaction, TransactionKind, TransactionStatus, UserProfile,
};

/// Devise unique des fixtures
pub const DEMO_CURRENCY: &str = "EUR";

/// Minuit UTC pour une date donnée
///
/// Les dates des fixtures sont toutes valides ; une date invalide
/// retomberait sur l'epoch plutôt que de paniquer.
fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Utilisateur de démonstration
pub fn demo_user() -> UserProfile {
    UserProfile {
        id: "1".to_string(),
        email: "demo@example.com".to_string(),
        name: "Demo User".to_string(),
        balance: dec!(5500000),
        total_invested: dec!(5500000),
        total_earnings: dec!(5500000),
        is_verified: true,
        created_at: day(2024, 1, 1),
    }
}

fn transaction(
    id: &str,
    kind: TransactionKind,
    amount: Decimal,
    date: DateTime<Utc>,
    description: &str,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind,
        amount,
        currency: DEMO_CURRENCY.to_string(),
        status: TransactionStatus::Completed,
        date,
        description: description.to_string(),
    }
}

/// Transactions de démonstration (ordre d'insertion)
pub fn demo_transactions() -> Vec<Transaction> {
    vec![
        transaction("1", TransactionKind::Deposit, dec!(100000), day(2024, 1, 15), "Initial Deposit"),
        transaction("2", TransactionKind::Investment, dec!(50000), day(2024, 1, 20), "Bitcoin Mining Investment"),
        transaction("3", TransactionKind::Earnings, dec!(15000), day(2024, 2, 1), "Monthly Returns"),
        transaction("4", TransactionKind::Deposit, dec!(200000), day(2024, 2, 10), "Additional Investment"),
        transaction("5", TransactionKind::Earnings, dec!(25000), day(2024, 3, 1), "Quarterly Bonus"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn investment(
    id: &str,
    name: &str,
    amount: Decimal,
    return_rate: Decimal,
    duration: &str,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    current_value: Decimal,
) -> Investment {
    Investment {
        id: id.to_string(),
        name: name.to_string(),
        amount,
        return_rate,
        duration: duration.to_string(),
        status: InvestmentStatus::Active,
        start_date,
        end_date,
        current_value,
    }
}

/// Placements de démonstration (ordre d'insertion)
pub fn demo_investments() -> Vec<Investment> {
    vec![
        investment(
            "1",
            "Bitcoin Mining Pool",
            dec!(500000),
            dec!(12.5),
            "12 months",
            day(2024, 1, 15),
            day(2025, 1, 15),
            dec!(562500),
        ),
        investment(
            "2",
            "Ethereum Staking",
            dec!(300000),
            dec!(8.3),
            "6 months",
            day(2024, 2, 1),
            day(2024, 8, 1),
            dec!(324900),
        ),
        investment(
            "3",
            "DeFi Yield Farming",
            dec!(200000),
            dec!(15.2),
            "3 months",
            day(2024, 3, 1),
            day(2024, 6, 1),
            dec!(230400),
        ),
        investment(
            "4",
            "Altcoin Portfolio",
            dec!(400000),
            dec!(18.7),
            "12 months",
            day(2024, 1, 20),
            day(2025, 1, 20),
            dec!(474800),
        ),
        investment(
            "5",
            "NFT Trading Fund",
            dec!(150000),
            dec!(22.4),
            "9 months",
            day(2024, 2, 15),
            day(2024, 11, 15),
            dec!(183600),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_amounts_are_consistent() {
        let user = demo_user();
        assert!(user.balance >= Decimal::ZERO);
        assert!(user.total_invested >= Decimal::ZERO);
        assert!(user.total_earnings >= Decimal::ZERO);

        for tx in demo_transactions() {
            assert!(tx.amount > Decimal::ZERO, "transaction {} must be positive", tx.id);
            assert_eq!(tx.currency, DEMO_CURRENCY);
        }

        for inv in demo_investments() {
            assert!(inv.current_value >= inv.amount, "{} lost value", inv.name);
            assert!(inv.end_date > inv.start_date);
        }
    }

    #[test]
    fn test_fixture_dates() {
        let user = demo_user();
        assert_eq!(crate::format::format_date(&user.created_at), "1.1.2024");

        let first = &demo_transactions()[0];
        assert_eq!(crate::format::format_date(&first.date), "15.1.2024");
    }
}
