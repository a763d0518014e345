// ============================================================================
// Configuration : arguments CLI + variables d'environnement
// ============================================================================
// CONCEPT RUST : clap derive
// - #[derive(Parser)] génère le parsing à partir de la structure
// - env = "..." : fallback sur une variable d'environnement
// - value_enum : les variantes d'un enum deviennent des valeurs autorisées
//
// Exemples :
//   investboard --no-latency
//   investboard --withdrawal-outcome accept --withdrawal-message "OK"
//   INVESTBOARD_BACKEND=http INVESTBOARD_BASE_URL=http://api:8080 investboard
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;

use crate::api::demo::{DEFAULT_DEPOSIT_MESSAGE, DEFAULT_WITHDRAWAL_MESSAGE};
use crate::api::{DataProvider, DemoLatency, DemoProvider, HttpProvider};
use crate::models::Outcome;
use crate::views::payment_form::DEFAULT_AVAILABLE_BALANCE;

/// Nom de l'application (répertoire de logs, fichier de log)
pub const APP_NAME: &str = "investboard";

/// Source des données
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Fixtures en mémoire avec latence simulée
    Demo,
    /// Backend HTTP/JSON
    Http,
}

/// Réponse du provider de démo aux retraits
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WithdrawalOutcome {
    /// Refus systématique (comportement par défaut de la démo)
    Reject,
    /// Acceptation systématique
    Accept,
}

/// Arguments de ligne de commande
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Investment dashboard in the terminal", long_about = None)]
pub struct Cli {
    /// Source des données
    #[arg(long, value_enum, default_value_t = Backend::Demo, env = "INVESTBOARD_BACKEND")]
    pub backend: Backend,

    /// URL du backend HTTP (--backend http)
    #[arg(long, default_value = "http://localhost:8080", env = "INVESTBOARD_BASE_URL")]
    pub base_url: String,

    /// Solde disponible au retrait (EUR)
    #[arg(long, default_value_t = DEFAULT_AVAILABLE_BALANCE)]
    pub available_balance: Decimal,

    /// Réponse du provider de démo aux retraits
    #[arg(long, value_enum, default_value_t = WithdrawalOutcome::Reject)]
    pub withdrawal_outcome: WithdrawalOutcome,

    /// Message renvoyé par le provider de démo aux retraits
    #[arg(long)]
    pub withdrawal_message: Option<String>,

    /// Désactive la latence simulée du provider de démo
    #[arg(long, default_value_t = false)]
    pub no_latency: bool,

    /// Répertoire des fichiers de log
    #[arg(long, env = "INVESTBOARD_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Configuration résolue de l'application
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    pub base_url: String,
    pub available_balance: Decimal,
    pub withdrawal_outcome: Outcome,
    pub latency: DemoLatency,
    pub log_dir: PathBuf,
}

impl Config {
    /// Résout les arguments en configuration
    pub fn from_cli(cli: Cli) -> Self {
        let withdrawal_outcome = match cli.withdrawal_outcome {
            WithdrawalOutcome::Reject => Outcome::failure(
                cli.withdrawal_message
                    .unwrap_or_else(|| DEFAULT_WITHDRAWAL_MESSAGE.to_string()),
            ),
            WithdrawalOutcome::Accept => Outcome::success(
                cli.withdrawal_message
                    .unwrap_or_else(|| "Auszahlung erfolgreich beantragt!".to_string()),
            ),
        };

        let latency = if cli.no_latency {
            DemoLatency::none()
        } else {
            DemoLatency::default()
        };

        Self {
            backend: cli.backend,
            base_url: cli.base_url,
            available_balance: cli.available_balance,
            withdrawal_outcome,
            latency,
            log_dir: cli.log_dir.unwrap_or_else(default_log_dir),
        }
    }

    /// Construit le provider choisi
    ///
    /// CONCEPT RUST : Arc<dyn Trait>
    /// - Le provider est partagé entre l'event loop et le worker thread
    /// - dyn DataProvider : le type concret est choisi à l'exécution
    pub fn provider(&self) -> Result<Arc<dyn DataProvider>> {
        let provider: Arc<dyn DataProvider> = match self.backend {
            Backend::Demo => Arc::new(
                DemoProvider::new()
                    .with_latency(self.latency)
                    .with_deposit_outcome(Outcome::success(DEFAULT_DEPOSIT_MESSAGE))
                    .with_withdrawal_outcome(self.withdrawal_outcome.clone()),
            ),
            Backend::Http => Arc::new(HttpProvider::new(&self.base_url)?),
        };
        Ok(provider)
    }
}

/// Répertoire de logs par défaut
///
/// - Linux/WSL : ~/.local/share/investboard/logs
/// - macOS : ~/Library/Application Support/investboard/logs
/// - Windows : C:\Users\<user>\AppData\Local\investboard\logs
/// - Sinon : ./logs
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_NAME).join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["investboard"]).unwrap();
        assert_eq!(cli.backend, Backend::Demo);
        assert_eq!(cli.available_balance, dec!(5500000));

        let config = Config::from_cli(cli);
        assert!(!config.withdrawal_outcome.success);
        assert_eq!(config.withdrawal_outcome.message, DEFAULT_WITHDRAWAL_MESSAGE);
        assert_eq!(config.latency, DemoLatency::default());
    }

    #[test]
    fn test_withdrawal_outcome_is_configurable() {
        let cli = Cli::try_parse_from([
            "investboard",
            "--withdrawal-outcome",
            "accept",
            "--withdrawal-message",
            "Alles gut",
            "--no-latency",
            "--available-balance",
            "1000.50",
            "--log-dir",
            "/tmp/investboard-logs",
        ])
        .unwrap();

        let config = Config::from_cli(cli);
        assert_eq!(config.withdrawal_outcome, Outcome::success("Alles gut"));
        assert_eq!(config.latency, DemoLatency::none());
        assert_eq!(config.available_balance, dec!(1000.50));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/investboard-logs"));
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["investboard", "--backend", "ftp"]).is_err());
        assert!(Cli::try_parse_from(["investboard", "--available-balance", "viel"]).is_err());
    }

    #[tokio::test]
    async fn test_demo_provider_uses_configured_outcome() {
        let cli = Cli::try_parse_from([
            "investboard",
            "--no-latency",
            "--withdrawal-message",
            "Bitte später erneut",
        ])
        .unwrap();
        let provider = Config::from_cli(cli).provider().unwrap();

        let outcome = provider
            .process_withdrawal(dec!(10), crate::models::PaymentMethod::Usdt, "T9y")
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::failure("Bitte später erneut"));
    }
}
