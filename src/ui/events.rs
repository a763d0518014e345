// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching sur KeyCode + KeyModifiers
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Intervalle entre deux ticks (anime le spinner de chargement)
pub const TICK_RATE: Duration = Duration::from_millis(120);

// ============================================================================
// Enum Event
// ============================================================================
// CONCEPT RUST : Enums avec données
// - Key(KeyEvent) : stocke l'événement clavier complet
// - Tick : variant sans données (unit variant)
// ============================================================================

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (spinner, lecture des résultats du worker)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            tick_rate: TICK_RATE,
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(tick_rate) attend au plus un tick
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),

                // Release, resize, souris : ignorés
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : reconnaître les touches
// ============================================================================
// CONCEPT RUST : Pattern matching avec if let + matches!
// - Destructure Event::Key et vérifie le KeyCode en une ligne
// ============================================================================

/// Code de touche, si l'événement est une touche
fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

/// Vérifie si l'événement est la touche 'q' (quitter)
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

/// Vérifie si l'événement est Ctrl-C (quitter sans confirmation)
pub fn is_interrupt_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    } else {
        false
    }
}

/// Vérifie si l'événement est Échap
pub fn is_escape_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Esc))
}

/// Vérifie si l'événement est Entrée
pub fn is_enter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Enter))
}

/// Vérifie si l'événement est Backspace
pub fn is_backspace_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Backspace))
}

/// Tab ou flèche bas : champ suivant
pub fn is_next_field_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Tab | KeyCode::Down))
}

/// Shift-Tab ou flèche haut : champ précédent
pub fn is_previous_field_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::BackTab | KeyCode::Up))
}

/// Flèche droite : option suivante
pub fn is_right_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Right))
}

/// Flèche gauche : option précédente
pub fn is_left_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Left))
}

/// Vérifie si l'événement est une lettre donnée (insensible à la casse)
///
/// Utilisé pour les raccourcis de navigation du dashboard :
/// 'i' investitionen, 'h' verlauf, 'w' auszahlen, 'e' einzahlen, 'r' reload
pub fn is_shortcut_event(event: &Event, shortcut: char) -> bool {
    if let Event::Key(key) = event {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&shortcut))
    } else {
        false
    }
}

/// Extrait le caractère d'un événement clavier si c'est un caractère
///
/// Les combinaisons Ctrl/Alt ne sont pas de la saisie.
pub fn get_char_from_event(event: &Event) -> Option<char> {
    if let Event::Key(key) = event {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        if let KeyCode::Char(c) = key.code {
            return Some(c);
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_interrupt_requires_control() {
        assert!(is_interrupt_event(&ctrl('c')));
        assert!(!is_interrupt_event(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn test_field_navigation() {
        assert!(is_next_field_event(&key(KeyCode::Tab)));
        assert!(is_previous_field_event(&key(KeyCode::BackTab)));
        assert!(is_right_event(&key(KeyCode::Right)));
        assert!(is_left_event(&key(KeyCode::Left)));
        assert!(!is_next_field_event(&key(KeyCode::Enter)));
    }

    #[test]
    fn test_shortcuts() {
        assert!(is_shortcut_event(&key(KeyCode::Char('w')), 'w'));
        assert!(is_shortcut_event(&key(KeyCode::Char('W')), 'w'));
        assert!(!is_shortcut_event(&ctrl('w'), 'w'));
        assert!(!is_shortcut_event(&Event::Tick, 'w'));
    }

    #[test]
    fn test_get_char_ignores_modifiers() {
        assert_eq!(get_char_from_event(&key(KeyCode::Char('7'))), Some('7'));
        assert_eq!(get_char_from_event(&ctrl('c')), None);
        assert_eq!(get_char_from_event(&key(KeyCode::Enter)), None);
    }
}
