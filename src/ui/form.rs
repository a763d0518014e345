// ============================================================================
// Écrans de formulaire : Auszahlung / Einzahlung
// ============================================================================
// Mise en page :
//
//   ┌ Auszahlung ─────────────────────┐┌ Verfügbares Guthaben ┐
//   │ ┌ Betrag (EUR) ───────────────┐ ││   5.500.000,00 €     │
//   │ └─────────────────────────────┘ │└──────────────────────┘
//   │ ┌ Auszahlungsmethode ─────────┐ │┌ Informationen ───────┐
//   │ └─────────────────────────────┘ ││ Bearbeitungszeit ... │
//   │ ┌ Wallet-Adresse ─────────────┐ ││ Mindestbetrag ...    │
//   │ └─────────────────────────────┘ ││ Gebühr ...           │
//   │ [Enter] Auszahlung anfordern    │└──────────────────────┘
//   │ message de résultat             │
//   └─────────────────────────────────┘
//
// Le champ qui a le focus a une bordure jaune et un curseur.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::format::format_currency;
use crate::ui::layout::{create_layout, render_footer, render_header, screen_title, titled_block};
use crate::views::payment_form::MINIMUM_AMOUNT;
use crate::views::{FormField, FormKind, PaymentForm, SubmitState};

/// Dessine l'écran du formulaire actif
pub fn render_form(frame: &mut Frame, app: &App, form: &PaymentForm) {
    let chunks = create_layout(frame.size());
    render_header(frame, chunks[0], screen_title(app.current_screen));

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_fields(frame, app, form, columns[0]);
    render_side_panel(frame, app, form, columns[1]);

    render_footer(frame, app, chunks[2]);
}

// ============================================================================
// Champs
// ============================================================================

fn render_fields(frame: &mut Frame, app: &App, form: &PaymentForm, area: Rect) {
    let outer = titled_block(form.kind.title());
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    // Un bloc de 3 lignes par champ, puis la ligne de submit et le message
    let mut constraints: Vec<Constraint> = form.fields().iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(1)); // Indication minimum
    constraints.push(Constraint::Length(2)); // Submit
    constraints.push(Constraint::Min(0)); // Résultat

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, field) in form.fields().iter().enumerate() {
        render_field(frame, form, *field, rows[index]);
    }

    let hint_row = rows[form.fields().len()];
    let submit_row = rows[form.fields().len() + 1];
    let result_row = rows[form.fields().len() + 2];

    if form.below_minimum() {
        let hint = Paragraph::new(Span::styled(
            format!("Mindestbetrag: {}", format_currency(MINIMUM_AMOUNT)),
            Style::default().fg(Color::Yellow),
        ));
        frame.render_widget(hint, hint_row);
    }

    frame.render_widget(Paragraph::new(submit_line(app, form)), submit_row);

    if let Some(line) = result_line(&form.state) {
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), result_row);
    }
}

fn field_title(kind: FormKind, field: FormField) -> &'static str {
    match (kind, field) {
        (_, FormField::Amount) => "Betrag (EUR)",
        (FormKind::Withdrawal, FormField::Method) => "Auszahlungsmethode",
        (FormKind::Deposit, FormField::Method) => "Einzahlungsmethode",
        (_, FormField::Address) => "Wallet-Adresse oder Kontodetails",
    }
}

/// Texte affiché dans un champ
///
/// Placeholder grisé si le champ est vide.
fn field_value(form: &PaymentForm, field: FormField) -> Line<'static> {
    let placeholder = Style::default().fg(Color::DarkGray);

    match field {
        FormField::Amount if form.amount.is_empty() => Line::from(Span::styled("0,00", placeholder)),
        FormField::Amount => Line::from(form.amount.clone()),
        FormField::Method => match form.method {
            Some(method) => Line::from(vec![
                Span::styled("◀ ", Style::default().fg(Color::Yellow)),
                Span::raw(method.label()),
                Span::styled(" ▶", Style::default().fg(Color::Yellow)),
            ]),
            None => Line::from(Span::styled("Bitte wählen (←/→)", placeholder)),
        },
        FormField::Address if form.address.is_empty() => {
            Line::from(Span::styled("Adresse eingeben", placeholder))
        }
        FormField::Address => Line::from(form.address.clone()),
    }
}

fn render_field(frame: &mut Frame, form: &PaymentForm, field: FormField, area: Rect) {
    let focused = form.focus == field;
    let border_color = if focused { Color::Yellow } else { Color::Gray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", field_title(form.kind, field)));

    let mut line = field_value(form, field);
    if focused && field != FormField::Method && !form.is_submitting() {
        line.spans.push(Span::styled(
            "█",
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    frame.render_widget(Paragraph::new(line).block(block), area);
}

// ============================================================================
// Submit et résultat
// ============================================================================

fn submit_line(app: &App, form: &PaymentForm) -> Line<'static> {
    if form.is_submitting() {
        Line::from(Span::styled(
            format!("{} Wird verarbeitet...", app.spinner()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                "[Enter] ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(form.kind.submit_label(), Style::default().add_modifier(Modifier::BOLD)),
        ])
    }
}

/// Message de résultat : vert en cas de succès, rouge sinon
fn result_line(state: &SubmitState) -> Option<Line<'static>> {
    match state {
        SubmitState::Succeeded(message) => Some(Line::from(Span::styled(
            format!("✓ {}", message),
            Style::default().fg(Color::Green),
        ))),
        SubmitState::Failed(message) => Some(Line::from(Span::styled(
            format!("✗ {}", message),
            Style::default().fg(Color::Red),
        ))),
        SubmitState::Idle | SubmitState::Submitting => None,
    }
}

// ============================================================================
// Panneau latéral : solde + informations
// ============================================================================

fn render_side_panel(frame: &mut Frame, app: &App, form: &PaymentForm, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    // Le retrait est plafonné par le solde configuré, le dépôt affiche le solde du compte
    let (title, balance) = match form.kind {
        FormKind::Withdrawal => ("Verfügbares Guthaben", form.available_balance),
        FormKind::Deposit => (
            "Aktuelles Guthaben",
            app.dashboard
                .data
                .user
                .as_ref()
                .map(|user| user.balance)
                .unwrap_or_default(),
        ),
    };

    let balance_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format_currency(balance),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(balance_text)
            .block(titled_block(title))
            .alignment(Alignment::Center),
        rows[0],
    );

    let info = Paragraph::new(info_lines(form.kind))
        .block(titled_block("Informationen"))
        .wrap(Wrap { trim: true });
    frame.render_widget(info, rows[1]);
}

fn info_lines(kind: FormKind) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let minimum = format_currency(MINIMUM_AMOUNT);

    match kind {
        FormKind::Withdrawal => vec![
            Line::from(vec![Span::styled("Bearbeitungszeit: ", label), Span::raw("1-3 Werktage")]),
            Line::from(vec![Span::styled("Mindestbetrag: ", label), Span::raw(minimum)]),
            Line::from(vec![Span::styled("Gebühr: ", label), Span::raw("2%")]),
        ],
        FormKind::Deposit => vec![
            Line::from(vec![Span::styled("Gutschrift: ", label), Span::raw("nach Bestätigung")]),
            Line::from(vec![Span::styled("Mindestbetrag: ", label), Span::raw(minimum)]),
            Line::from(vec![Span::styled("Zahlungsmethoden: ", label), Span::raw("Krypto, Bank, PIX, PayPal")]),
        ],
    }
}
