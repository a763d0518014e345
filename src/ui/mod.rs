// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod layout;    // Header, footer, découpage commun
pub mod dashboard; // Écran principal
pub mod lists;     // Investitionen / Verlauf
pub mod form;      // Auszahlung / Einzahlung

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};

use ratatui::Frame;

use crate::app::{App, Screen};

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Pattern matching sur app.current_screen
/// - Le compilateur garantit l'exhaustivité (tous les cas gérés)
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Dashboard => dashboard::render_dashboard(frame, app),
        Screen::Investments => lists::render_investments(frame, app),
        Screen::History => lists::render_history(frame, app),
        Screen::Withdraw => form::render_form(frame, app, &app.withdrawal),
        Screen::Deposit => form::render_form(frame, app, &app.deposit),
    }
}
