// ============================================================================
// DemoProvider : provider de démonstration
// ============================================================================
// Renvoie les fixtures après une latence simulée, sans aucune I/O réelle.
//
// Les résultats des écritures sont injectables :
// - dépôt : succès par défaut
// - retrait : refus par défaut ("zahlen Sie 550 EUR ein"), quel que soit
//   le montant. Configurable pour tester les deux branches du formulaire.
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::api::{fixtures, DataProvider};
use crate::models::{Investment, Outcome, PaymentMethod, Transaction, UserProfile};

/// Message du refus de retrait par défaut
pub const DEFAULT_WITHDRAWAL_MESSAGE: &str =
    "Fehlgeschlagene Auszahlung. Bitte zahlen Sie 550 EUR ein, um den Betrag abheben zu können.";

/// Message de succès de dépôt par défaut
pub const DEFAULT_DEPOSIT_MESSAGE: &str = "Einzahlung erfolgreich verarbeitet!";

/// Latences simulées par type d'opération
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoLatency {
    /// Lecture du profil
    pub user: Duration,
    /// Lecture des transactions et des placements
    pub lists: Duration,
    /// Dépôt et retrait
    pub writes: Duration,
}

impl DemoLatency {
    /// Aucune latence (tests, --no-latency)
    pub fn none() -> Self {
        Self {
            user: Duration::ZERO,
            lists: Duration::ZERO,
            writes: Duration::ZERO,
        }
    }
}

impl Default for DemoLatency {
    fn default() -> Self {
        Self {
            user: Duration::from_millis(500),
            lists: Duration::from_millis(300),
            writes: Duration::from_millis(1500),
        }
    }
}

/// Provider qui sert les fixtures en mémoire
#[derive(Debug, Clone)]
pub struct DemoProvider {
    latency: DemoLatency,
    deposit_outcome: Outcome,
    withdrawal_outcome: Outcome,
}

impl DemoProvider {
    /// Provider avec les latences et résultats par défaut
    pub fn new() -> Self {
        Self {
            latency: DemoLatency::default(),
            deposit_outcome: Outcome::success(DEFAULT_DEPOSIT_MESSAGE),
            withdrawal_outcome: Outcome::failure(DEFAULT_WITHDRAWAL_MESSAGE),
        }
    }

    /// CONCEPT RUST : Builder pattern
    /// - Prend self par valeur et le renvoie modifié
    /// - Permet DemoProvider::new().with_latency(..).with_withdrawal_outcome(..)
    pub fn with_latency(mut self, latency: DemoLatency) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_deposit_outcome(mut self, outcome: Outcome) -> Self {
        self.deposit_outcome = outcome;
        self
    }

    pub fn with_withdrawal_outcome(mut self, outcome: Outcome) -> Self {
        self.withdrawal_outcome = outcome;
        self
    }

    /// Simule la latence réseau
    async fn simulate(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataProvider for DemoProvider {
    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<UserProfile> {
        self.simulate(self.latency.user).await;
        debug!("Serving demo user");
        Ok(fixtures::demo_user())
    }

    #[instrument(skip(self))]
    async fn user_transactions(&self) -> Result<Vec<Transaction>> {
        self.simulate(self.latency.lists).await;
        let transactions = fixtures::demo_transactions();
        debug!(count = transactions.len(), "Serving demo transactions");
        Ok(transactions)
    }

    #[instrument(skip(self))]
    async fn user_investments(&self) -> Result<Vec<Investment>> {
        self.simulate(self.latency.lists).await;
        let investments = fixtures::demo_investments();
        debug!(count = investments.len(), "Serving demo investments");
        Ok(investments)
    }

    // Le montant et la méthode sont acceptés mais ni validés ni enregistrés
    #[instrument(skip(self, method))]
    async fn process_deposit(&self, amount: Decimal, method: PaymentMethod) -> Result<Outcome> {
        self.simulate(self.latency.writes).await;
        info!(%amount, method = method.value(), success = self.deposit_outcome.success, "Demo deposit processed");
        Ok(self.deposit_outcome.clone())
    }

    #[instrument(skip(self, method, _address))]
    async fn process_withdrawal(
        &self,
        amount: Decimal,
        method: PaymentMethod,
        _address: &str,
    ) -> Result<Outcome> {
        self.simulate(self.latency.writes).await;
        info!(%amount, method = method.value(), success = self.withdrawal_outcome.success, "Demo withdrawal processed");
        Ok(self.withdrawal_outcome.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn provider() -> DemoProvider {
        DemoProvider::new().with_latency(DemoLatency::none())
    }

    #[tokio::test]
    async fn test_reads_return_fixtures_in_order() {
        let provider = provider();

        let user = provider.current_user().await.unwrap();
        assert_eq!(user.email, "demo@example.com");
        assert_eq!(user.balance, dec!(5500000));

        let transactions = provider.user_transactions().await.unwrap();
        let ids: Vec<&str> = transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);

        let investments = provider.user_investments().await.unwrap();
        assert_eq!(investments.len(), 5);
        assert_eq!(investments[0].name, "Bitcoin Mining Pool");
    }

    #[tokio::test]
    async fn test_withdrawal_is_always_rejected_by_default() {
        let provider = provider();

        for (amount, method) in [
            (dec!(100), PaymentMethod::Bitcoin),
            (dec!(0.01), PaymentMethod::Bank),
            (dec!(5500000), PaymentMethod::Paypal),
        ] {
            let outcome = provider
                .process_withdrawal(amount, method, "bc1qdemo")
                .await
                .unwrap();
            assert!(!outcome.success);
            assert!(outcome.message.contains("550 EUR"));
        }
    }

    #[tokio::test]
    async fn test_deposit_always_succeeds() {
        let outcome = provider()
            .process_deposit(dec!(250), PaymentMethod::Pix)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::success(DEFAULT_DEPOSIT_MESSAGE));
    }

    #[tokio::test]
    async fn test_outcomes_are_injectable() {
        let provider = provider()
            .with_withdrawal_outcome(Outcome::success("Auszahlung angenommen"))
            .with_deposit_outcome(Outcome::failure("Einzahlung abgelehnt"));

        let withdrawal = provider
            .process_withdrawal(dec!(100), PaymentMethod::Ethereum, "0xdemo")
            .await
            .unwrap();
        assert!(withdrawal.success);

        let deposit = provider
            .process_deposit(dec!(100), PaymentMethod::Ethereum)
            .await
            .unwrap();
        assert!(!deposit.success);
    }

    #[tokio::test]
    async fn test_writes_do_not_mutate_fixtures() {
        let provider = provider();
        let before = provider.current_user().await.unwrap();

        provider.process_deposit(dec!(1000), PaymentMethod::Bank).await.unwrap();
        provider
            .process_withdrawal(dec!(1000), PaymentMethod::Bank, "DE00")
            .await
            .unwrap();

        assert_eq!(provider.current_user().await.unwrap(), before);
        assert_eq!(provider.user_transactions().await.unwrap().len(), 5);
    }
}
