// ============================================================================
// HttpProvider : le contrat DataProvider sur un backend HTTP/JSON
// ============================================================================
// Endpoints (relatifs à base_url) :
// - GET  /user          -> UserProfile
// - GET  /investments   -> [Investment]
// - GET  /transactions  -> [Transaction]
// - POST /withdrawals   {amount, method, address} -> Outcome
// - POST /deposits      {amount, method}          -> Outcome
//
// Pas de timeout ni de retry : une erreur remonte telle quelle à l'appelant.
// ============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::api::DataProvider;
use crate::models::{Investment, Outcome, PaymentMethod, Transaction, UserProfile};

/// Corps de POST /withdrawals
#[derive(Debug, Serialize)]
struct WithdrawalBody<'a> {
    amount: Decimal,
    method: PaymentMethod,
    address: &'a str,
}

/// Corps de POST /deposits
#[derive(Debug, Serialize)]
struct DepositBody {
    amount: Decimal,
    method: PaymentMethod,
}

/// Client HTTP du backend
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProvider {
    /// Crée un provider vers `base_url` (ex: "http://localhost:8080")
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("investboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL complète d'un endpoint
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET + désérialisation JSON
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        debug!(url = %url, "Sending GET request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Échec de la requête HTTP vers {}", url))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "Backend returned error status");
            anyhow::bail!("Le backend a retourné une erreur : HTTP {}", status);
        }

        response
            .json()
            .await
            .with_context(|| format!("Échec du parsing JSON de {}", url))
    }

    /// POST d'un corps JSON, réponse Outcome
    async fn post_outcome<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Outcome> {
        let url = self.endpoint(path);
        debug!(url = %url, "Sending POST request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Échec de la requête HTTP vers {}", url))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "Backend returned error status");
            anyhow::bail!("Le backend a retourné une erreur : HTTP {}", status);
        }

        let outcome: Outcome = response
            .json()
            .await
            .with_context(|| format!("Échec du parsing JSON de {}", url))?;

        info!(success = outcome.success, "Backend answered write request");
        Ok(outcome)
    }
}

#[async_trait]
impl DataProvider for HttpProvider {
    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<UserProfile> {
        self.get_json("user").await
    }

    #[instrument(skip(self))]
    async fn user_transactions(&self) -> Result<Vec<Transaction>> {
        self.get_json("transactions").await
    }

    #[instrument(skip(self))]
    async fn user_investments(&self) -> Result<Vec<Investment>> {
        self.get_json("investments").await
    }

    #[instrument(skip(self, method), fields(method = method.value()))]
    async fn process_deposit(&self, amount: Decimal, method: PaymentMethod) -> Result<Outcome> {
        self.post_outcome("deposits", &DepositBody { amount, method }).await
    }

    #[instrument(skip(self, method, address), fields(method = method.value()))]
    async fn process_withdrawal(
        &self,
        amount: Decimal,
        method: PaymentMethod,
        address: &str,
    ) -> Result<Outcome> {
        let body = WithdrawalBody {
            amount,
            method,
            address,
        };
        self.post_outcome("withdrawals", &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_endpoint_joins_paths() {
        let provider = HttpProvider::new("http://localhost:8080/").unwrap();
        assert_eq!(provider.endpoint("user"), "http://localhost:8080/user");
        assert_eq!(provider.endpoint("/deposits"), "http://localhost:8080/deposits");

        let provider = HttpProvider::new("https://api.example.com/v1").unwrap();
        assert_eq!(provider.endpoint("investments"), "https://api.example.com/v1/investments");
    }

    #[test]
    fn test_withdrawal_body_shape() {
        let body = WithdrawalBody {
            amount: dec!(100),
            method: PaymentMethod::Bitcoin,
            address: "bc1qdemo",
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["method"], "bitcoin");
        assert_eq!(json["address"], "bc1qdemo");
        assert_eq!(json["amount"].as_f64(), Some(100.0));
    }

    // Test async nécessite tokio test runtime
    // Aucun serveur n'écoute sur ce port : l'erreur doit remonter, pas paniquer
    #[tokio::test]
    async fn test_unreachable_backend_returns_error() {
        let provider = HttpProvider::new("http://127.0.0.1:9").unwrap();
        assert!(provider.current_user().await.is_err());
    }
}
