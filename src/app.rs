// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Ownership : App appartient à l'event loop, le worker n'y touche pas
//    (il renvoie des résultats par channel)
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// ============================================================================

use rust_decimal::Decimal;

use crate::models::Outcome;
use crate::views::{DashboardData, DashboardState, FormKind, PaymentForm};

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : cartes de synthèse + listes récentes
    Dashboard,

    /// Tous les placements
    Investments,

    /// Tout l'historique des transactions
    History,

    /// Formulaire de retrait
    Withdraw,

    /// Formulaire de dépôt
    Deposit,
}

impl Screen {
    /// true pour les écrans où le clavier sert à saisir du texte
    pub fn is_form(&self) -> bool {
        matches!(self, Screen::Withdraw | Screen::Deposit)
    }
}

/// Caractères du spinner de chargement
const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    pub confirm_quit: bool,

    /// Données et état de chargement du dashboard
    pub dashboard: DashboardState,

    /// Formulaire de retrait
    pub withdrawal: PaymentForm,

    /// Formulaire de dépôt
    pub deposit: PaymentForm,

    /// Compteur de ticks pour animer le spinner
    pub tick_count: usize,
}

impl App {
    /// Crée l'application, dashboard en cours de chargement
    pub fn new(available_balance: Decimal) -> Self {
        Self {
            running: true,
            current_screen: Screen::Dashboard,
            confirm_quit: false,
            dashboard: DashboardState::new(),
            withdrawal: PaymentForm::withdrawal(available_balance),
            deposit: PaymentForm::deposit(),
            tick_count: 0,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick : appelé à chaque itération de la boucle (anime le spinner)
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    /// Caractère courant du spinner
    pub fn spinner(&self) -> char {
        SPINNER_FRAMES[self.tick_count % SPINNER_FRAMES.len()]
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Change d'écran
    ///
    /// Annule une éventuelle demande de quit en cours.
    pub fn show(&mut self, screen: Screen) {
        self.confirm_quit = false;
        self.current_screen = screen;
    }

    pub fn show_dashboard(&mut self) {
        self.show(Screen::Dashboard);
    }

    pub fn is_on_dashboard(&self) -> bool {
        self.current_screen == Screen::Dashboard
    }

    pub fn is_on_form(&self) -> bool {
        self.current_screen.is_form()
    }

    /// Formulaire de l'écran courant, s'il y en a un
    pub fn active_form(&self) -> Option<&PaymentForm> {
        match self.current_screen {
            Screen::Withdraw => Some(&self.withdrawal),
            Screen::Deposit => Some(&self.deposit),
            _ => None,
        }
    }

    pub fn active_form_mut(&mut self) -> Option<&mut PaymentForm> {
        match self.current_screen {
            Screen::Withdraw => Some(&mut self.withdrawal),
            Screen::Deposit => Some(&mut self.deposit),
            _ => None,
        }
    }

    /// Formulaire correspondant à un type
    pub fn form_mut(&mut self, kind: FormKind) -> &mut PaymentForm {
        match kind {
            FormKind::Withdrawal => &mut self.withdrawal,
            FormKind::Deposit => &mut self.deposit,
        }
    }

    // ========================================================================
    // Confirmation de quit
    // ========================================================================

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Résultats du worker
    // ========================================================================

    /// Démarre un (re)chargement du dashboard
    pub fn start_loading(&mut self) {
        self.dashboard.begin_loading();
    }

    /// Vérifie si des données sont en cours de chargement
    pub fn is_loading_data(&self) -> bool {
        self.dashboard.loading
    }

    /// Données du dashboard reçues
    pub fn dashboard_loaded(&mut self, data: DashboardData) {
        self.dashboard.finish_loading(data);
    }

    /// Résultat d'un formulaire reçu
    pub fn payment_finished(&mut self, kind: FormKind, outcome: Outcome) {
        self.form_mut(kind).complete(outcome);
    }

    /// Worker perdu : les formulaires en cours d'envoi passent en échec
    ///
    /// Retourne le nombre de formulaires débloqués.
    pub fn abort_pending_payments(&mut self, message: &str) -> usize {
        let mut aborted = 0;
        for form in [&mut self.withdrawal, &mut self.deposit] {
            if form.is_submitting() {
                form.complete(Outcome::failure(message));
                aborted += 1;
            }
        }
        aborted
    }
}

// ============================================================================
// Trait Default
// ============================================================================
// Solde disponible par défaut pour le formulaire de retrait
// ============================================================================

impl Default for App {
    fn default() -> Self {
        Self::new(crate::views::payment_form::DEFAULT_AVAILABLE_BALANCE)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
