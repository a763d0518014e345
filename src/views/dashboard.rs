// ============================================================================
// Vue Dashboard : chargement et modèle d'affichage
// ============================================================================
// Tout ce que l'écran dashboard affiche, calculé sans terminal :
// - chargement concurrent du profil, des placements et des transactions
// - les quatre cartes de synthèse
// - les 5 premiers placements / transactions (ordre du provider)
// - la règle de signe des transactions (+ vert / - rouge)
//
// CONCEPT RUST : tokio::try_join!
// - Lance les trois futures en parallèle et attend les trois
// - La première erreur fait échouer l'ensemble (pas de succès partiel)
// ============================================================================

use rust_decimal::Decimal;
use tracing::{error, info};

use crate::api::DataProvider;
use crate::format::{format_currency, format_date, format_return_rate};
use crate::models::{Investment, Transaction, UserProfile};

/// Nombre de lignes affichées dans les listes du dashboard
pub const RECENT_LIMIT: usize = 5;

/// Données chargées pour un affichage du dashboard
///
/// Default = état vide (pas d'utilisateur, listes vides), utilisé quand
/// le chargement échoue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub user: Option<UserProfile>,
    pub investments: Vec<Investment>,
    pub transactions: Vec<Transaction>,
}

/// Charge les trois jeux de données en parallèle
///
/// Une erreur est loggée puis remplacée par des données vides :
/// l'écran sort quand même de l'état de chargement.
pub async fn load_dashboard(provider: &dyn DataProvider) -> DashboardData {
    let result = tokio::try_join!(
        provider.current_user(),
        provider.user_investments(),
        provider.user_transactions(),
    );

    match result {
        Ok((user, investments, transactions)) => {
            info!(
                investments = investments.len(),
                transactions = transactions.len(),
                "Dashboard data loaded"
            );
            DashboardData {
                user: Some(user),
                investments,
                transactions,
            }
        }
        Err(e) => {
            error!(error = ?e, "Error loading dashboard data");
            DashboardData::default()
        }
    }
}

/// État de l'écran dashboard (possédé par App)
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// true tant que le chargement n'est pas terminé
    pub loading: bool,
    pub data: DashboardData,
}

impl DashboardState {
    /// État initial : en chargement, rien à afficher
    pub fn new() -> Self {
        Self {
            loading: true,
            data: DashboardData::default(),
        }
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    pub fn finish_loading(&mut self, data: DashboardData) {
        self.data = data;
        self.loading = false;
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Modèle d'affichage
// ============================================================================

/// Carte de synthèse (titre, montant formaté, légende)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
    pub caption: &'static str,
}

/// Ligne de la liste des placements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentRow {
    pub name: String,
    /// "500.000,00 € • 12 months"
    pub detail: String,
    /// "+12.5%"
    pub return_rate: String,
    pub current_value: String,
}

impl From<&Investment> for InvestmentRow {
    fn from(investment: &Investment) -> Self {
        Self {
            name: investment.name.clone(),
            detail: format!(
                "{} • {}",
                format_currency(investment.amount),
                investment.duration
            ),
            return_rate: format_return_rate(investment.return_rate),
            current_value: format_currency(investment.current_value),
        }
    }
}

/// Ligne de la liste des transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    pub description: String,
    /// Date courte allemande
    pub date: String,
    /// Montant signé : "+100.000,00 €" ou "-50.000,00 €"
    pub amount: String,
    /// true : crédit (vert), false : débit (rouge)
    pub credit: bool,
}

impl From<&Transaction> for TransactionRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            description: transaction.description.clone(),
            date: format_date(&transaction.date),
            amount: format!(
                "{}{}",
                transaction.kind.sign(),
                format_currency(transaction.amount)
            ),
            credit: transaction.kind.is_credit(),
        }
    }
}

impl DashboardData {
    /// Les quatre cartes de synthèse
    ///
    /// "Portfolio-Wert" reprend le solde, comme la carte "Gesamtguthaben".
    pub fn summary_cards(&self) -> [SummaryCard; 4] {
        let (balance, invested, earnings) = match &self.user {
            Some(user) => (user.balance, user.total_invested, user.total_earnings),
            None => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        };

        [
            SummaryCard {
                title: "Gesamtguthaben",
                value: format_currency(balance),
                caption: "+20.1% vom letzten Monat",
            },
            SummaryCard {
                title: "Gesamtinvestiert",
                value: format_currency(invested),
                caption: "15 aktive Investitionen",
            },
            SummaryCard {
                title: "Gesamtgewinn",
                value: format_currency(earnings),
                caption: "+15.3% Rendite",
            },
            SummaryCard {
                title: "Portfolio-Wert",
                value: format_currency(balance),
                caption: "Diversifiziert über 5 Assets",
            },
        ]
    }

    /// Les premiers placements, sans tri préalable
    pub fn recent_investments(&self) -> &[Investment] {
        let end = self.investments.len().min(RECENT_LIMIT);
        &self.investments[..end]
    }

    /// Les premières transactions, sans tri préalable
    pub fn recent_transactions(&self) -> &[Transaction] {
        let end = self.transactions.len().min(RECENT_LIMIT);
        &self.transactions[..end]
    }

    pub fn recent_investment_rows(&self) -> Vec<InvestmentRow> {
        self.recent_investments().iter().map(InvestmentRow::from).collect()
    }

    pub fn recent_transaction_rows(&self) -> Vec<TransactionRow> {
        self.recent_transactions().iter().map(TransactionRow::from).collect()
    }

    pub fn all_investment_rows(&self) -> Vec<InvestmentRow> {
        self.investments.iter().map(InvestmentRow::from).collect()
    }

    pub fn all_transaction_rows(&self) -> Vec<TransactionRow> {
        self.transactions.iter().map(TransactionRow::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{fixtures, DemoLatency, DemoProvider};
    use crate::models::{Outcome, PaymentMethod, TransactionKind};
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    /// Provider dont la lecture des placements échoue
    struct BrokenInvestments;

    #[async_trait]
    impl DataProvider for BrokenInvestments {
        async fn current_user(&self) -> Result<UserProfile> {
            Ok(fixtures::demo_user())
        }
        async fn user_transactions(&self) -> Result<Vec<Transaction>> {
            Ok(fixtures::demo_transactions())
        }
        async fn user_investments(&self) -> Result<Vec<Investment>> {
            anyhow::bail!("connection reset")
        }
        async fn process_deposit(&self, _: Decimal, _: PaymentMethod) -> Result<Outcome> {
            unreachable!()
        }
        async fn process_withdrawal(&self, _: Decimal, _: PaymentMethod, _: &str) -> Result<Outcome> {
            unreachable!()
        }
    }

    /// Provider dont les trois lectures s'attendent mutuellement :
    /// elles ne se terminent que si elles tournent en même temps
    struct RendezVous {
        barrier: tokio::sync::Barrier,
    }

    impl RendezVous {
        fn new() -> Self {
            Self {
                barrier: tokio::sync::Barrier::new(3),
            }
        }
    }

    #[async_trait]
    impl DataProvider for RendezVous {
        async fn current_user(&self) -> Result<UserProfile> {
            self.barrier.wait().await;
            Ok(fixtures::demo_user())
        }
        async fn user_transactions(&self) -> Result<Vec<Transaction>> {
            self.barrier.wait().await;
            Ok(fixtures::demo_transactions())
        }
        async fn user_investments(&self) -> Result<Vec<Investment>> {
            self.barrier.wait().await;
            Ok(fixtures::demo_investments())
        }
        async fn process_deposit(&self, _: Decimal, _: PaymentMethod) -> Result<Outcome> {
            unreachable!()
        }
        async fn process_withdrawal(&self, _: Decimal, _: PaymentMethod, _: &str) -> Result<Outcome> {
            unreachable!()
        }
    }

    fn many_transactions(count: usize) -> Vec<Transaction> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..count)
            .map(|i| Transaction {
                id: format!("t{}", i),
                kind: TransactionKind::Deposit,
                amount: Decimal::from(i as u64 + 1),
                currency: "EUR".to_string(),
                status: crate::models::TransactionStatus::Completed,
                // Dates décroissantes : un tri par date inverserait l'ordre
                date: start - Duration::days(i as i64),
                description: format!("Transaction {}", i),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_load_dashboard_from_demo_provider() {
        let provider = DemoProvider::new().with_latency(DemoLatency::none());
        let data = load_dashboard(&provider).await;

        assert_eq!(data.user, Some(fixtures::demo_user()));
        assert_eq!(data.investments.len(), 5);
        assert_eq!(data.transactions.len(), 5);
    }

    #[tokio::test]
    async fn test_dashboard_reads_run_concurrently() {
        let provider = RendezVous::new();

        // Des lectures séquentielles bloqueraient sur la barrière
        let data = tokio::time::timeout(std::time::Duration::from_secs(2), load_dashboard(&provider))
            .await
            .expect("dashboard reads did not run concurrently");

        assert!(data.user.is_some());
        assert_eq!(data.investments.len(), 5);
        assert_eq!(data.transactions.len(), 5);
    }

    #[tokio::test]
    async fn test_load_failure_falls_back_to_empty_data() {
        let data = load_dashboard(&BrokenInvestments).await;
        assert_eq!(data, DashboardData::default());

        let cards = data.summary_cards();
        assert!(cards.iter().all(|card| card.value == "0,00 €"));
    }

    #[test]
    fn test_state_leaves_loading_even_with_empty_data() {
        let mut state = DashboardState::new();
        assert!(state.loading);

        state.finish_loading(DashboardData::default());
        assert!(!state.loading);

        state.begin_loading();
        assert!(state.loading);
    }

    #[test]
    fn test_summary_cards_duplicate_balance_as_portfolio_value() {
        let data = DashboardData {
            user: Some(fixtures::demo_user()),
            ..Default::default()
        };
        let cards = data.summary_cards();

        let titles: Vec<&str> = cards.iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            ["Gesamtguthaben", "Gesamtinvestiert", "Gesamtgewinn", "Portfolio-Wert"]
        );
        assert_eq!(cards[0].value, "5.500.000,00 €");
        assert_eq!(cards[3].value, cards[0].value);
    }

    #[test]
    fn test_recent_lists_truncate_and_keep_order() {
        let transactions = many_transactions(8);
        let mut investments = fixtures::demo_investments();
        investments.extend(fixtures::demo_investments());

        let data = DashboardData {
            user: None,
            investments: investments.clone(),
            transactions: transactions.clone(),
        };

        assert_eq!(data.recent_transactions(), &transactions[..5]);
        assert_eq!(data.recent_investments(), &investments[..5]);
        assert_eq!(data.all_transaction_rows().len(), 8);
        assert_eq!(data.all_investment_rows().len(), 10);
    }

    #[test]
    fn test_recent_lists_with_fewer_records() {
        let data = DashboardData {
            user: None,
            investments: Vec::new(),
            transactions: many_transactions(2),
        };
        assert_eq!(data.recent_transactions().len(), 2);
        assert!(data.recent_investments().is_empty());
    }

    #[test]
    fn test_transaction_sign_rule_on_fixtures() {
        for tx in fixtures::demo_transactions() {
            let row = TransactionRow::from(&tx);
            match tx.kind {
                TransactionKind::Deposit | TransactionKind::Earnings => {
                    assert!(row.amount.starts_with('+'), "{}", row.amount);
                    assert!(row.credit);
                }
                TransactionKind::Withdrawal | TransactionKind::Investment => {
                    assert!(row.amount.starts_with('-'), "{}", row.amount);
                    assert!(!row.credit);
                }
            }
        }

        let first = TransactionRow::from(&fixtures::demo_transactions()[0]);
        assert_eq!(first.amount, "+100.000,00 €");
        assert_eq!(first.date, "15.1.2024");

        let second = TransactionRow::from(&fixtures::demo_transactions()[1]);
        assert_eq!(second.amount, "-50.000,00 €");
    }

    #[test]
    fn test_investment_row() {
        let row = InvestmentRow::from(&fixtures::demo_investments()[0]);
        assert_eq!(row.name, "Bitcoin Mining Pool");
        assert_eq!(row.detail, "500.000,00 € • 12 months");
        assert_eq!(row.return_rate, "+12.5%");
        assert_eq!(row.current_value, "562.500,00 €");
    }
}
