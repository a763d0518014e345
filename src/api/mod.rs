// ============================================================================
// Module : api
// ============================================================================
// Accès aux données du compte : profil, transactions, placements, et
// opérations d'écriture (dépôt, retrait).
//
// CONCEPT RUST : Trait object (dyn DataProvider)
// - Les vues ne connaissent que le trait, pas l'implémentation
// - DemoProvider : données fixes avec latence simulée
// - HttpProvider : le même contrat sur un vrai backend HTTP/JSON
// - #[async_trait] : rend les méthodes async utilisables derrière un dyn
// ============================================================================

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::{Investment, Outcome, PaymentMethod, Transaction, UserProfile};

pub mod demo;     // Provider de démonstration (fixtures en mémoire)
pub mod fixtures; // Données de démonstration
pub mod http;     // Provider HTTP (reqwest)

// Re-export des providers
pub use demo::{DemoLatency, DemoProvider};
pub use http::HttpProvider;

/// Contrat d'accès aux données du compte
///
/// Les lectures renvoient des copies : la vue ne possède que des données
/// transitoires, rechargées à chaque affichage du dashboard.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Profil de l'utilisateur connecté
    async fn current_user(&self) -> Result<UserProfile>;

    /// Transactions, dans l'ordre du provider (pas forcément triées par date)
    async fn user_transactions(&self) -> Result<Vec<Transaction>>;

    /// Placements, dans l'ordre du provider
    async fn user_investments(&self) -> Result<Vec<Investment>>;

    /// Demande de dépôt
    async fn process_deposit(&self, amount: Decimal, method: PaymentMethod) -> Result<Outcome>;

    /// Demande de retrait vers une adresse de wallet ou un compte
    async fn process_withdrawal(
        &self,
        amount: Decimal,
        method: PaymentMethod,
        address: &str,
    ) -> Result<Outcome>;
}
