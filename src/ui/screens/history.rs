use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::TransactionKind;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Transaction History ({}) ", app.history.len()),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.history.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press Esc to go back and add one",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .history
        .iter()
        .enumerate()
        .skip(app.history_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, entry)| {
            let kind_style = match entry.kind {
                TransactionKind::Income => theme::income_style(),
                TransactionKind::Expense => theme::expense_style(),
            };
            let style = if i == app.history_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                kind_style.bg(theme::SURFACE)
            } else {
                kind_style
            };
            Line::from(Span::styled(truncate(&entry.line, width), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
