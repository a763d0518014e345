// ============================================================================
// Layout commun : header, footer, découpage de l'écran
// ============================================================================
// Tous les écrans partagent la même structure :
//
//   ┌──────────── InvestBoard ────────────┐
//   │           titre de l'écran          │  header (3 lignes)
//   ├─────────────────────────────────────┤
//   │                                     │
//   │          contenu de l'écran         │  content (reste)
//   │                                     │
//   ├─────────────────────────────────────┤
//   │       raccourcis / confirmation     │  footer (3 lignes)
//   └─────────────────────────────────────┘
//
// CONCEPT RATATUI : Layout
// - split() découpe un Rect en plusieurs zones
// - Length(n) : exactement n lignes, Min(n) : au moins n lignes
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};

/// Couleur des bordures
pub const BORDER_COLOR: Color = Color::Cyan;

/// Crée le layout principal (header, content, footer)
///
/// CONCEPT RUST : Rc<[T]> vs Vec<T>
/// - Layout::split() retourne Rc<[Rect]>
/// - On le convertit en Vec avec .to_vec() pour simplifier
pub fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

/// Block standard avec bordures et titre
pub fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(format!(" {} ", title))
}

/// Dessine le header avec le titre de l'écran
pub fn render_header(frame: &mut Frame, area: Rect, subtitle: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(" InvestBoard ")
        .title_alignment(Alignment::Center);

    let text = Line::from(Span::styled(
        subtitle.to_string(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Titre affiché dans le header pour chaque écran
pub fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Dashboard => "Dashboard",
        Screen::Investments => "Investitionen",
        Screen::History => "Transaktionsverlauf",
        Screen::Withdraw => "Geld abheben",
        Screen::Deposit => "Geld einzahlen",
    }
}

/// Raccourci clavier stylé : "[q] Beenden  "
fn hint(key: &'static str, label: &'static str, color: Color) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(label),
    ]
}

/// Raccourcis affichés dans le footer selon l'écran
fn shortcuts(screen: Screen) -> Line<'static> {
    let spans: Vec<Span<'static>> = match screen {
        Screen::Dashboard => [
            hint("[q]", " Beenden  ", Color::Yellow),
            hint("[i]", " Investitionen  ", Color::Yellow),
            hint("[h]", " Verlauf  ", Color::Yellow),
            hint("[w]", " Auszahlen  ", Color::Red),
            hint("[e]", " Einzahlen  ", Color::Green),
            hint("[r]", " Aktualisieren", Color::Yellow),
        ]
        .into_iter()
        .flatten()
        .collect(),
        Screen::Investments | Screen::History => [
            hint("[Esc]", " Zurück  ", Color::Yellow),
            hint("[q]", " Beenden", Color::Yellow),
        ]
        .into_iter()
        .flatten()
        .collect(),
        Screen::Withdraw | Screen::Deposit => [
            hint("[Tab]", " Nächstes Feld  ", Color::Yellow),
            hint("[←/→]", " Methode  ", Color::Yellow),
            hint("[Enter]", " Absenden  ", Color::Green),
            hint("[Esc]", " Zurück", Color::Yellow),
        ]
        .into_iter()
        .flatten()
        .collect(),
    };

    Line::from(spans)
}

/// Dessine le footer avec les raccourcis clavier
///
/// CONCEPT : Confirmation de quit two-step
/// - Si app.is_awaiting_quit_confirmation(), affiche un avertissement
/// - Sinon, affiche les raccourcis de l'écran courant
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_COLOR));

    let line = if app.is_awaiting_quit_confirmation() {
        let warning = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled("⚠  Drücken Sie ", warning),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " erneut zum Beenden, oder eine andere Taste zum Abbrechen ⚠",
                warning,
            ),
        ])
    } else {
        shortcuts(app.current_screen)
    };

    let paragraph = Paragraph::new(line)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine un message centré (chargement, liste vide)
pub fn render_centered_message(frame: &mut Frame, area: Rect, block: Block, message: String, style: Style) {
    // Ligne vide pour centrer verticalement dans les petits blocs
    let text = vec![Line::from(""), Line::from(Span::styled(message, style))];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_layout_reserves_header_and_footer() {
        let chunks = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].height, 3);
        assert_eq!(chunks[2].height, 3);
        assert_eq!(chunks[1].height, 18);
    }

    #[test]
    fn test_shortcuts_follow_screen() {
        let dashboard = line_text(&shortcuts(Screen::Dashboard));
        assert!(dashboard.contains("[w] Auszahlen"));
        assert!(dashboard.contains("[e] Einzahlen"));

        let form = line_text(&shortcuts(Screen::Withdraw));
        assert!(form.contains("[Enter] Absenden"));
        assert!(!form.contains("[q]"));
    }
}
