// ============================================================================
// Écrans de liste : Investitionen et Transaktionsverlauf
// ============================================================================
// Même données que le dashboard, sans la limite de 5 lignes.
// Chaque entrée occupe deux lignes : la ligne du dashboard, puis le détail
// (statut, période ou date, identifiant).
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{List, ListItem},
    Frame,
};

use crate::app::{App, Screen};
use crate::format::{format_currency, format_date};
use crate::models::{Investment, InvestmentStatus, Transaction, TransactionStatus};
use crate::ui::dashboard::{investment_line, transaction_line};
use crate::ui::layout::{create_layout, render_centered_message, render_footer, render_header, screen_title, titled_block};
use crate::views::dashboard::{InvestmentRow, TransactionRow};

/// Dessine l'écran de tous les placements
pub fn render_investments(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());
    render_header(frame, chunks[0], screen_title(Screen::Investments));

    let investments = &app.dashboard.data.investments;
    let title = format!("Alle Investitionen ({})", investments.len());

    if app.is_loading_data() || investments.is_empty() {
        render_empty(frame, app, chunks[1], &title, "Keine Investitionen vorhanden");
    } else {
        let rows = app.dashboard.data.all_investment_rows();
        let items: Vec<ListItem> = rows
            .iter()
            .zip(investments)
            .map(|(row, investment)| investment_item(row, investment))
            .collect();
        frame.render_widget(List::new(items).block(titled_block(&title)), chunks[1]);
    }

    render_footer(frame, app, chunks[2]);
}

/// Dessine l'historique complet des transactions
pub fn render_history(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());
    render_header(frame, chunks[0], screen_title(Screen::History));

    let transactions = &app.dashboard.data.transactions;
    let title = format!("Alle Transaktionen ({})", transactions.len());

    if app.is_loading_data() || transactions.is_empty() {
        render_empty(frame, app, chunks[1], &title, "Keine Transaktionen vorhanden");
    } else {
        let rows = app.dashboard.data.all_transaction_rows();
        let items: Vec<ListItem> = rows
            .iter()
            .zip(transactions)
            .map(|(row, transaction)| transaction_item(row, transaction))
            .collect();
        frame.render_widget(List::new(items).block(titled_block(&title)), chunks[1]);
    }

    render_footer(frame, app, chunks[2]);
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect, title: &str, empty_message: &str) {
    let (message, color) = if app.is_loading_data() {
        (format!("{} Daten werden geladen...", app.spinner()), Color::Yellow)
    } else {
        (empty_message.to_string(), Color::Gray)
    };

    render_centered_message(frame, area, titled_block(title), message, Style::default().fg(color));
}

fn investment_item(row: &InvestmentRow, investment: &Investment) -> ListItem<'static> {
    let status_color = match investment.status {
        InvestmentStatus::Active => Color::Green,
        InvestmentStatus::Completed => Color::Gray,
    };

    let detail = Line::from(vec![
        Span::raw("  "),
        Span::styled(investment.status.label(), Style::default().fg(status_color)),
        Span::styled(
            format!(
                "  {} - {}  Gewinn: {}",
                format_date(&investment.start_date),
                format_date(&investment.end_date),
                format_currency(investment.unrealized_gain()),
            ),
            Style::default().fg(Color::Gray),
        ),
    ]);

    ListItem::new(Text::from(vec![investment_line(row), detail]))
}

fn transaction_item(row: &TransactionRow, transaction: &Transaction) -> ListItem<'static> {
    let status_color = match transaction.status {
        TransactionStatus::Completed => Color::Green,
        TransactionStatus::Pending => Color::Yellow,
        TransactionStatus::Failed => Color::Red,
    };

    let detail = Line::from(vec![
        Span::raw("  "),
        Span::styled(transaction.status.label(), Style::default().fg(status_color)),
        Span::styled(
            format!("  #{}  {}", transaction.id, transaction.currency),
            Style::default().fg(Color::Gray),
        ),
    ]);

    ListItem::new(Text::from(vec![transaction_line(row), detail]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures;
    use crate::views::DashboardData;

    #[test]
    fn test_items_span_two_lines() {
        let data = DashboardData {
            user: None,
            investments: fixtures::demo_investments(),
            transactions: fixtures::demo_transactions(),
        };

        let investment_rows = data.all_investment_rows();
        assert_eq!(investment_item(&investment_rows[0], &data.investments[0]).height(), 2);

        let transaction_rows = data.all_transaction_rows();
        assert_eq!(transaction_item(&transaction_rows[0], &data.transactions[0]).height(), 2);
    }

    #[test]
    fn test_full_lists_are_not_truncated() {
        let mut investments = fixtures::demo_investments();
        investments.extend(fixtures::demo_investments());
        let data = DashboardData {
            user: None,
            investments,
            transactions: fixtures::demo_transactions(),
        };

        let rows = data.all_investment_rows();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[9].name, "NFT Trading Fund");
    }
}
