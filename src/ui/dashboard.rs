// ============================================================================
// Dashboard - Rendu de l'écran principal
// ============================================================================
// Dessine l'écran principal avec les widgets de ratatui :
//
//   ┌ Gesamtguthaben ┐┌ Gesamtinvestiert ┐┌ Gesamtgewinn ┐┌ Portfolio-Wert ┐
//   └────────────────┘└──────────────────┘└──────────────┘└────────────────┘
//   ┌ Kontoübersicht ──────────────────────────────────────────────────────┐
//   └──────────────────────────────────────────────────────────────────────┘
//   ┌ Aktive Investitionen ────────────┐┌ Letzte Transaktionen ───────────┐
//   │ ...                              ││ ...                             │
//   └──────────────────────────────────┘└─────────────────────────────────┘
//
// Les valeurs affichées viennent du modèle d'affichage (views::dashboard),
// ce module ne fait que la mise en page et les couleurs.
//
// CONCEPTS RATATUI :
// 1. Layout imbriqués (vertical puis horizontal)
// 2. List / ListItem pour les lignes
// 3. Span + Style pour colorer une partie de ligne
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::format::format_date;
use crate::ui::layout::{create_layout, render_centered_message, render_footer, render_header, screen_title, titled_block};
use crate::views::dashboard::{InvestmentRow, SummaryCard, TransactionRow};

/// Titres des listes du dashboard
const INVESTMENTS_TITLE: &str = "Aktive Investitionen";
const TRANSACTIONS_TITLE: &str = "Letzte Transaktionen";

/// Dessine le dashboard complet
pub fn render_dashboard(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, chunks[0], screen_title(Screen::Dashboard));

    if app.is_loading_data() {
        render_loading(frame, app, chunks[1]);
    } else {
        render_content(frame, app, chunks[1]);
    }

    render_footer(frame, app, chunks[2]);
}

/// Spinner de chargement
///
/// Rien d'autre n'est affiché tant que le chargement n'est pas terminé.
fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    render_centered_message(
        frame,
        area,
        titled_block("Dashboard"),
        format!("{} Daten werden geladen...", app.spinner()),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    );
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Cartes de synthèse
            Constraint::Length(4), // Kontoübersicht
            Constraint::Min(0),    // Listes
        ])
        .split(area);

    render_summary_cards(frame, app, rows[0]);
    render_account_overview(frame, app, rows[1]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    let data = &app.dashboard.data;
    render_investment_list(frame, lists[0], INVESTMENTS_TITLE, &data.recent_investment_rows());
    render_transaction_list(frame, lists[1], TRANSACTIONS_TITLE, &data.recent_transaction_rows());
}

// ============================================================================
// Cartes de synthèse
// ============================================================================

fn render_summary_cards(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    // CONCEPT RUST : zip sur deux itérateurs
    // - Associe chaque carte à sa colonne
    for (card, column) in app.dashboard.data.summary_cards().iter().zip(columns.iter()) {
        render_card(frame, *column, card);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &SummaryCard) {
    let text = vec![
        Line::from(Span::styled(
            card.value.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(card.caption, Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(text)
        .block(titled_block(card.title))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Kontoübersicht
// ============================================================================

fn render_account_overview(frame: &mut Frame, app: &App, area: Rect) {
    let block = titled_block("Kontoübersicht");

    let Some(user) = &app.dashboard.data.user else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "Keine Kontodaten verfügbar",
            Style::default().fg(Color::Gray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let verification = if user.is_verified {
        Span::styled("✓ Verifiziert", Style::default().fg(Color::Green))
    } else {
        Span::styled("✗ Nicht verifiziert", Style::default().fg(Color::Red))
    };

    let text = vec![
        Line::from(vec![
            Span::styled(user.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  <{}>", user.email)),
        ]),
        Line::from(vec![
            Span::raw("Kontostatus: "),
            verification,
            Span::raw(format!("   Mitglied seit: {}", format_date(&user.created_at))),
        ]),
    ];

    frame.render_widget(Paragraph::new(text).block(block), area);
}

// ============================================================================
// Listes
// ============================================================================
// Partagées avec les écrans Investitionen / Verlauf (ui::lists)
// ============================================================================

/// Ligne d'un placement : nom, principal • durée, taux (vert), valeur actuelle
pub fn investment_line(row: &InvestmentRow) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<22} ", row.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:<28} ", row.detail), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:>7} ", row.return_rate), Style::default().fg(Color::Green)),
        Span::raw(format!("{:>16}", row.current_value)),
    ])
}

/// Ligne d'une transaction : description, date, montant signé
///
/// Crédit (dépôt, gains) en vert, débit (retrait, placement) en rouge.
pub fn transaction_line(row: &TransactionRow) -> Line<'static> {
    let amount_color = if row.credit { Color::Green } else { Color::Red };

    Line::from(vec![
        Span::styled(
            format!("{:<28} ", row.description),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:>10} ", row.date), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{:>16}", row.amount),
            Style::default().fg(amount_color).add_modifier(Modifier::BOLD),
        ),
    ])
}

pub fn render_investment_list(frame: &mut Frame, area: Rect, title: &str, rows: &[InvestmentRow]) {
    let block = titled_block(title);

    if rows.is_empty() {
        render_centered_message(
            frame,
            area,
            block,
            "Keine Investitionen vorhanden".to_string(),
            Style::default().fg(Color::Gray),
        );
        return;
    }

    let items: Vec<ListItem> = rows.iter().map(|row| ListItem::new(investment_line(row))).collect();
    frame.render_widget(List::new(items).block(block), area);
}

pub fn render_transaction_list(frame: &mut Frame, area: Rect, title: &str, rows: &[TransactionRow]) {
    let block = titled_block(title);

    if rows.is_empty() {
        render_centered_message(
            frame,
            area,
            block,
            "Keine Transaktionen vorhanden".to_string(),
            Style::default().fg(Color::Gray),
        );
        return;
    }

    let items: Vec<ListItem> = rows.iter().map(|row| ListItem::new(transaction_line(row))).collect();
    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures;

    #[test]
    fn test_list_titles() {
        assert_eq!(INVESTMENTS_TITLE, "Aktive Investitionen");
        assert_eq!(TRANSACTIONS_TITLE, "Letzte Transaktionen");
    }

    #[test]
    fn test_transaction_line_colours() {
        let rows: Vec<TransactionRow> = fixtures::demo_transactions()
            .iter()
            .map(TransactionRow::from)
            .collect();

        let deposit = transaction_line(&rows[0]);
        assert_eq!(deposit.spans[2].style.fg, Some(Color::Green));
        assert!(deposit.spans[2].content.trim().starts_with('+'));

        let investment = transaction_line(&rows[1]);
        assert_eq!(investment.spans[2].style.fg, Some(Color::Red));
        assert_eq!(investment.spans[2].content.trim(), "-50.000,00 €");
    }

    #[test]
    fn test_investment_line_shows_rate_in_green() {
        let row = InvestmentRow::from(&fixtures::demo_investments()[1]);
        let line = investment_line(&row);

        assert!(line.spans[0].content.starts_with("Ethereum Staking"));
        assert_eq!(line.spans[2].content.trim(), "+8.3%");
        assert_eq!(line.spans[2].style.fg, Some(Color::Green));
    }
}
