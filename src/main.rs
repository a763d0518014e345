// ============================================================================
// InvestBoard - Dashboard d'investissement dans le terminal
// ============================================================================
// Programme TUI : cartes de synthèse, placements, transactions,
// formulaires de retrait et de dépôt
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. Async dans sync : worker thread avec son runtime tokio
// 4. Channels : l'event loop possède App, le worker renvoie des résultats
// ============================================================================

use std::io;
use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use investboard::app::{App, Screen};
use investboard::config::{Cli, Config, APP_NAME};
use investboard::models::Outcome;
use investboard::ui::{events::EventHandler, render};
use investboard::views::payment_form::GENERIC_FAILURE_MESSAGE;
use investboard::views::DashboardData;
use investboard::worker::{spawn_worker, AppCommand, AppResult};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// CONCEPT RUST : Tracing subscriber
/// - Registry : point central des logs
/// - Layer : transforme et route les logs
/// - EnvFilter : filtre par niveau (RUST_LOG env var)
/// - RollingFileAppender : rotation automatique
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/investboard/logs/investboard.log.*
/// RUST_LOG=investboard=trace investboard
/// ```
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{}.log", APP_NAME));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "investboard=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse());

    // Si l'init du logging échoue, on prévient et on continue
    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(backend = ?config.backend, base_url = %config.base_url, "InvestBoard starting up");

    let provider = config.provider()?;

    // CONCEPT RUST : mpsc channels
    // - command_tx/rx : l'event loop envoie des commandes au worker
    // - result_tx/rx : le worker renvoie ses résultats
    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    // Pas de join à la sortie : une écriture en cours (1,5 s) retarderait le quit
    let _worker = spawn_worker(provider, command_rx, result_tx)?;

    let mut app = App::new(config.available_balance);
    request_dashboard(&mut app, &command_tx);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &command_tx, &result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// CONCEPT : Game Loop / Event Loop Pattern
// À chaque itération :
//   0. Appliquer les résultats du worker
//   1. Dessiner l'interface (render)
//   2. Traiter les événements (input)
//   3. Mettre à jour l'état (tick)
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: &mpsc::Sender<AppCommand>,
    result_rx: &mpsc::Receiver<AppResult>,
) -> Result<()> {
    let mut worker_lost = false;

    while app.is_running() {
        // ========================================
        // 0. RÉSULTATS : vide le channel sans bloquer
        // ========================================
        // CONCEPT : Non-blocking receive avec try_recv
        // - Ok(result) : traite le résultat
        // - Err(Empty) : plus rien pour ce frame
        // - Err(Disconnected) : worker mort
        loop {
            match result_rx.try_recv() {
                Ok(result) => apply_result(app, result),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    if !worker_lost {
                        error!("Worker thread disconnected!");
                        worker_lost = true;
                    }
                    // Aucune réponse n'arrivera plus pour un envoi en cours
                    let aborted = app.abort_pending_payments(GENERIC_FAILURE_MESSAGE);
                    if aborted > 0 {
                        warn!(aborted, "Pending payment requests failed, worker is gone");
                    }
                    if app.is_loading_data() {
                        app.dashboard_loaded(DashboardData::default());
                    }
                    break;
                }
            }
        }

        // ========================================
        // 1. RENDER
        // ========================================
        terminal
            .draw(|frame| render(frame, app))
            .context("Échec du rendu du terminal")?;

        // ========================================
        // 2. INPUT
        // ========================================
        match events.next() {
            Ok(event) => handle_event(app, event, command_tx),
            Err(e) => warn!(error = ?e, "Failed to read terminal event"),
        }

        // ========================================
        // 3. UPDATE
        // ========================================
        app.tick();
    }

    Ok(())
}

/// Applique un résultat du worker à l'état de l'application
fn apply_result(app: &mut App, result: AppResult) {
    match result {
        AppResult::DashboardLoaded(data) => {
            debug!(has_user = data.user.is_some(), "Applying dashboard data");
            app.dashboard_loaded(data);
        }
        AppResult::PaymentFinished { kind, outcome } => {
            info!(?kind, success = outcome.success, message = %outcome.message, "Payment outcome received");
            app.payment_finished(kind, outcome);
        }
    }
}

/// Lance un (re)chargement du dashboard
///
/// Si le worker ne répond plus, on sort quand même de l'état de chargement.
fn request_dashboard(app: &mut App, command_tx: &mpsc::Sender<AppCommand>) {
    app.start_loading();
    if command_tx.send(AppCommand::LoadDashboard).is_err() {
        error!("Worker unavailable, dashboard cannot be loaded");
        app.dashboard_loaded(DashboardData::default());
    }
}

// ============================================================================
// Gestion des événements
// ============================================================================
// CONCEPT : Event Handler Pattern
// - Sur un formulaire, le clavier sert à la saisie ('q' est un caractère)
// - Ailleurs, les lettres sont des raccourcis
// - Ctrl-C quitte partout
// ============================================================================

fn handle_event(app: &mut App, event: investboard::ui::events::Event, command_tx: &mpsc::Sender<AppCommand>) {
    use investboard::ui::events::{is_interrupt_event, Event};

    if let Event::Tick = event {
        return;
    }

    if is_interrupt_event(&event) {
        info!("User interrupted with Ctrl-C");
        app.quit();
        return;
    }

    if app.is_on_form() {
        handle_form_event(app, &event, command_tx);
    } else {
        handle_navigation_event(app, &event, command_tx);
    }
}

/// Touches hors formulaire : quit two-step, raccourcis, retour
fn handle_navigation_event(
    app: &mut App,
    event: &investboard::ui::events::Event,
    command_tx: &mpsc::Sender<AppCommand>,
) {
    use investboard::ui::events::{is_escape_event, is_quit_event, is_shortcut_event};

    if is_quit_event(event) {
        // Première pression : confirmation, deuxième : quit réel
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return;
    }

    if app.is_on_dashboard() {
        let target = [
            ('i', Screen::Investments),
            ('h', Screen::History),
            ('w', Screen::Withdraw),
            ('e', Screen::Deposit),
        ]
        .into_iter()
        .find(|(key, _)| is_shortcut_event(event, *key));

        if let Some((_, screen)) = target {
            debug!(?screen, "User opened screen");
            app.show(screen);
        } else if is_shortcut_event(event, 'r') {
            app.cancel_quit();
            if app.is_loading_data() {
                debug!("Reload ignored, already loading");
            } else {
                info!("User requested dashboard reload");
                request_dashboard(app, command_tx);
            }
        } else {
            app.cancel_quit();
        }
        return;
    }

    if is_escape_event(event) {
        debug!("User returned to dashboard");
        app.show_dashboard();
    } else {
        app.cancel_quit();
    }
}

/// Touches sur un formulaire : focus, saisie, choix de méthode, submit
fn handle_form_event(app: &mut App, event: &investboard::ui::events::Event, command_tx: &mpsc::Sender<AppCommand>) {
    use investboard::ui::events::{
        get_char_from_event, is_backspace_event, is_enter_event, is_escape_event, is_left_event,
        is_next_field_event, is_previous_field_event, is_right_event,
    };
    use investboard::views::FormField;

    if is_escape_event(event) {
        debug!("User left form");
        app.show_dashboard();
        return;
    }

    let Some(form) = app.active_form_mut() else {
        return;
    };

    if is_enter_event(event) {
        // Validation locale : une erreur est déjà affichée par le formulaire
        if let Ok(request) = form.begin_submit() {
            if command_tx.send(AppCommand::SubmitPayment(request)).is_err() {
                error!("Worker unavailable, payment request dropped");
                form.complete(Outcome::failure(GENERIC_FAILURE_MESSAGE));
            }
        }
    } else if is_next_field_event(event) {
        form.focus_next();
    } else if is_previous_field_event(event) {
        form.focus_previous();
    } else if is_right_event(event) && form.focus == FormField::Method {
        form.next_method();
    } else if is_left_event(event) && form.focus == FormField::Method {
        form.previous_method();
    } else if is_backspace_event(event) {
        form.backspace();
    } else if let Some(c) = get_char_from_event(event) {
        form.input_char(c);
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// CONCEPT RUST : Terminal raw mode
// - Raw mode : on reçoit tous les caractères directement
// - Alternate screen : écran secondaire (ne pollue pas l'historique)
//
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Échec de l'entrée dans l'alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Échec de la création du terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use investboard::models::PaymentMethod;
    use investboard::ui::events::Event;
    use investboard::views::payment_form::DEFAULT_AVAILABLE_BALANCE;
    use investboard::views::{FormKind, SubmitState};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn type_text(app: &mut App, tx: &mpsc::Sender<AppCommand>, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)), tx);
        }
    }

    #[test]
    fn test_quit_needs_two_presses() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(DEFAULT_AVAILABLE_BALANCE);

        handle_event(&mut app, key(KeyCode::Char('q')), &tx);
        assert!(app.is_running());
        handle_event(&mut app, key(KeyCode::Char('q')), &tx);
        assert!(!app.is_running());
    }

    #[test]
    fn test_q_is_text_on_forms() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(DEFAULT_AVAILABLE_BALANCE);
        app.show(Screen::Withdraw);
        app.withdrawal.focus = investboard::views::FormField::Address;

        type_text(&mut app, &tx, "qq");
        assert!(app.is_running());
        assert_eq!(app.withdrawal.address, "qq");

        handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            &tx,
        );
        assert!(!app.is_running());
    }

    #[test]
    fn test_reload_sends_one_command() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(DEFAULT_AVAILABLE_BALANCE);
        app.dashboard_loaded(DashboardData::default());

        handle_event(&mut app, key(KeyCode::Char('r')), &tx);
        assert!(app.is_loading_data());
        // Déjà en chargement : pas de seconde commande
        handle_event(&mut app, key(KeyCode::Char('r')), &tx);

        assert!(matches!(rx.try_recv(), Ok(AppCommand::LoadDashboard)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_valid_withdrawal_is_sent_to_worker() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(DEFAULT_AVAILABLE_BALANCE);

        handle_event(&mut app, key(KeyCode::Char('w')), &tx);
        assert_eq!(app.current_screen, Screen::Withdraw);

        type_text(&mut app, &tx, "250,5");
        handle_event(&mut app, key(KeyCode::Tab), &tx);
        handle_event(&mut app, key(KeyCode::Right), &tx);
        handle_event(&mut app, key(KeyCode::Tab), &tx);
        type_text(&mut app, &tx, "bc1qdemo");
        handle_event(&mut app, key(KeyCode::Enter), &tx);

        assert!(app.withdrawal.is_submitting());
        match rx.try_recv() {
            Ok(AppCommand::SubmitPayment(request)) => {
                assert_eq!(request.kind, FormKind::Withdrawal);
                assert_eq!(request.amount.to_string(), "250.5");
                assert_eq!(request.method, PaymentMethod::Bitcoin);
                assert_eq!(request.address, "bc1qdemo");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        // Un second Enter pendant l'envoi ne renvoie rien
        handle_event(&mut app, key(KeyCode::Enter), &tx);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_invalid_withdrawal_stays_local() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(DEFAULT_AVAILABLE_BALANCE);
        app.show(Screen::Withdraw);

        type_text(&mut app, &tx, "9999999");
        handle_event(&mut app, key(KeyCode::Enter), &tx);

        assert_eq!(
            app.withdrawal.state,
            SubmitState::Failed("Unzureichendes Guthaben.".to_string())
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dead_worker_fails_submission() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut app = App::new(DEFAULT_AVAILABLE_BALANCE);
        app.show(Screen::Deposit);

        type_text(&mut app, &tx, "100");
        handle_event(&mut app, key(KeyCode::Tab), &tx);
        handle_event(&mut app, key(KeyCode::Left), &tx);
        handle_event(&mut app, key(KeyCode::Enter), &tx);

        assert_eq!(
            app.deposit.state,
            SubmitState::Failed(GENERIC_FAILURE_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_escape_returns_to_dashboard() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(DEFAULT_AVAILABLE_BALANCE);

        handle_event(&mut app, key(KeyCode::Char('h')), &tx);
        assert_eq!(app.current_screen, Screen::History);
        handle_event(&mut app, key(KeyCode::Esc), &tx);
        assert!(app.is_on_dashboard());
    }
}
