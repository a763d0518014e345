// ============================================================================
// Background Worker Thread
// ============================================================================
// CONCEPT RUST : Background async worker avec channels
// - Thread séparé qui traite les commandes async
// - Reçoit des AppCommand via un channel (command_rx)
// - Envoie des AppResult via un autre channel (result_tx)
// - Permet d'appeler le provider sans bloquer l'UI
//
// Le worker ne touche jamais à App : l'event loop applique les résultats.
// ============================================================================

use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use crate::api::DataProvider;
use crate::models::Outcome;
use crate::views::payment_form::dispatch;
use crate::views::{load_dashboard, DashboardData, FormKind, PaymentRequest};

/// Commandes envoyées au worker thread pour exécuter des tâches async
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Charger (ou recharger) les données du dashboard
    LoadDashboard,

    /// Envoyer une requête de formulaire validée
    SubmitPayment(PaymentRequest),
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
pub enum AppResult {
    /// Données du dashboard (vides si le chargement a échoué)
    DashboardLoaded(DashboardData),

    /// Réponse du provider à un formulaire
    PaymentFinished { kind: FormKind, outcome: Outcome },
}

/// Lance le worker thread
///
/// CONCEPT RUST : Thread + async runtime
/// - std::thread::spawn() : crée un thread OS
/// - Le runtime tokio est créé par l'appelant puis déplacé (move) dans le thread
/// - block_on() bloque le thread worker, pas l'UI
///
/// Le thread se termine quand tous les Sender<AppCommand> sont droppés.
pub fn spawn_worker(
    provider: Arc<dyn DataProvider>,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) -> Result<JoinHandle<()>> {
    let runtime = Runtime::new().context("Échec de la création du runtime tokio")?;

    let handle = std::thread::Builder::new()
        .name("investboard-worker".to_string())
        .spawn(move || run_worker(runtime, provider, command_rx, result_tx))
        .context("Échec du lancement du worker thread")?;

    Ok(handle)
}

/// Boucle de traitement des commandes
fn run_worker(
    runtime: Runtime,
    provider: Arc<dyn DataProvider>,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) {
    // recv() renvoie Err quand le channel est fermé : fin du worker
    while let Ok(command) = command_rx.recv() {
        info!(?command, "Worker received command");

        let result = match command {
            AppCommand::LoadDashboard => {
                let data = runtime.block_on(load_dashboard(provider.as_ref()));
                AppResult::DashboardLoaded(data)
            }
            AppCommand::SubmitPayment(request) => {
                let outcome = runtime.block_on(dispatch(provider.as_ref(), &request));
                debug!(success = outcome.success, "Payment request answered");
                AppResult::PaymentFinished {
                    kind: request.kind,
                    outcome,
                }
            }
        };

        if result_tx.send(result).is_err() {
            warn!("Result channel closed, dropping worker result");
            break;
        }
    }

    info!("Worker thread exiting (channel closed)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DemoLatency, DemoProvider};
    use crate::models::PaymentMethod;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn start() -> (mpsc::Sender<AppCommand>, mpsc::Receiver<AppResult>, JoinHandle<()>) {
        let provider = Arc::new(DemoProvider::new().with_latency(DemoLatency::none()));
        let (command_tx, command_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        let handle = spawn_worker(provider, command_rx, result_tx).unwrap();
        (command_tx, result_rx, handle)
    }

    #[test]
    fn test_worker_loads_dashboard() {
        let (command_tx, result_rx, handle) = start();

        command_tx.send(AppCommand::LoadDashboard).unwrap();
        let result = result_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        match result {
            AppResult::DashboardLoaded(data) => {
                assert!(data.user.is_some());
                assert_eq!(data.transactions.len(), 5);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        drop(command_tx);
        handle.join().unwrap();
    }

    #[test]
    fn test_worker_answers_payment_with_form_kind() {
        let (command_tx, result_rx, handle) = start();

        command_tx
            .send(AppCommand::SubmitPayment(PaymentRequest {
                kind: FormKind::Deposit,
                amount: dec!(100),
                method: PaymentMethod::Paypal,
                address: String::new(),
            }))
            .unwrap();

        match result_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppResult::PaymentFinished { kind, outcome } => {
                assert_eq!(kind, FormKind::Deposit);
                assert!(outcome.success);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        drop(command_tx);
        handle.join().unwrap();
    }
}
