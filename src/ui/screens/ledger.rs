use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::controller::{Controller, AMOUNT_PLACEHOLDER, DESCRIPTION_PLACEHOLDER};
use crate::models::Currency;
use crate::ui::app::{App, Focus, InputMode};
use crate::ui::theme;
use crate::ui::util::field_text;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, controller: &Controller) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Currency selector
            Constraint::Length(5), // Totals
            Constraint::Length(3), // Amount
            Constraint::Length(3), // Description
            Constraint::Min(4),    // Actions
        ])
        .split(area);

    render_currency_selector(f, chunks[0], controller.currency());
    render_totals(f, chunks[1], controller);
    render_field(
        f,
        chunks[2],
        "Amount",
        &controller.form.amount,
        AMOUNT_PLACEHOLDER,
        app.input_mode == InputMode::Editing && app.focus == Focus::Amount,
    );
    render_field(
        f,
        chunks[3],
        "Description",
        &controller.form.description,
        DESCRIPTION_PLACEHOLDER,
        app.input_mode == InputMode::Editing && app.focus == Focus::Description,
    );
    render_actions(f, chunks[4]);

    if app.input_mode == InputMode::Editing {
        let (area, value) = match app.focus {
            Focus::Amount => (chunks[2], &controller.form.amount),
            Focus::Description => (chunks[3], &controller.form.description),
        };
        let offset = value.chars().count() as u16;
        f.set_cursor_position((area.x + 1 + offset, area.y + 1));
    }
}

fn render_currency_selector(f: &mut Frame, area: Rect, selected: Currency) {
    let mut spans = vec![Span::styled(" Currency: ", theme::dim_style())];
    for currency in Currency::all() {
        let label = format!(" {} ", currency.code());
        if *currency == selected {
            spans.push(Span::styled(label, theme::selected_style()));
        } else {
            spans.push(Span::styled(label, theme::normal_style()));
        }
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!("({})", selected.profile().locale),
        theme::dim_style(),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_totals(f: &mut Frame, area: Rect, controller: &Controller) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    let labels = controller.labels();
    let balance_color = if controller.totals().balance() >= Decimal::ZERO {
        theme::GREEN
    } else {
        theme::RED
    };

    render_card(f, cards[0], &labels.income, theme::GREEN);
    render_card(f, cards[1], &labels.expenses, theme::RED);
    render_card(f, cards[2], &labels.balance, balance_color);
}

/// Labels read `"<Title>: <amount>"`; the title goes on the border.
fn render_card(f: &mut Frame, area: Rect, label: &str, color: Color) {
    let (title, value) = label.split_once(": ").unwrap_or((label, ""));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let (text, is_placeholder) = field_text(value, placeholder);
    let style = if is_placeholder {
        theme::dim_style()
    } else {
        theme::normal_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::field_border_style(focused))
        .title(Span::styled(format!(" {title} "), theme::dim_style()));
    f.render_widget(
        Paragraph::new(Span::styled(text.to_string(), style)).block(block),
        area,
    );
}

fn render_actions(f: &mut Frame, area: Rect) {
    let hint = |key: &'static str, label: &'static str| {
        vec![
            Span::styled(format!(" {key} "), theme::key_hint_style()),
            Span::styled(format!("{label:<20}"), theme::normal_style()),
        ]
    };

    let lines = vec![
        Line::from([hint("i", "Add Income"), hint("e", "Add Expense")].concat()),
        Line::from([hint("v", "View Transactions"), hint("c", "Clear")].concat()),
        Line::from([hint("X", "Clear Database"), hint("u", "Switch Currency")].concat()),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Actions ", theme::dim_style()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
