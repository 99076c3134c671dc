use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Dialog, InputMode, Screen};
use super::commands;
use super::theme;
use super::util::centered_rect;
use crate::controller::Controller;

pub(crate) fn render(f: &mut Frame, app: &App, controller: &Controller) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], app, controller);
    match app.screen {
        Screen::Ledger => super::screens::ledger::render(f, chunks[1], app, controller),
        Screen::History => super::screens::history::render(f, chunks[1], app),
    }
    render_status_bar(f, chunks[2], app, controller);
    render_command_bar(f, chunks[3], app);

    if app.input_mode == InputMode::Confirm {
        render_confirm(f, f.area(), app);
    }
    if let Some(dialog) = &app.dialog {
        render_dialog(f, f.area(), dialog);
    }
    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, app: &App, controller: &Controller) {
    let left = format!(" Personal Budget Tracker | {}", app.screen);
    let right = format!(" {} ", controller.currency());
    let pad = (area.width as usize).saturating_sub(left.chars().count() + right.len());

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(left, theme::title_style()),
        Span::styled(" ".repeat(pad), theme::title_style()),
        Span::styled(right, Style::default().fg(theme::ACCENT).bg(theme::HEADER_BG)),
    ]));
    f.render_widget(bar, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, controller: &Controller) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Editing | InputMode::Command => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let count = match controller.store().count() {
        Ok(n) => format!("{n} txns"),
        Err(_) => "? txns".to_string(),
    };
    let info = format!(" {} | {count}", app.screen);

    let right = match (app.screen, app.input_mode) {
        (_, InputMode::Editing) => " Tab switch field | Enter next | Esc done ",
        (Screen::Ledger, _) => " a/d edit | i/e add | v history | ? help ",
        (Screen::History, _) => " j/k scroll | g/G top/bottom | Esc back ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(Span::styled(
                " y to confirm, any other key to cancel",
                Style::default().fg(theme::YELLOW),
            )),
            None,
        ),
        InputMode::Normal | InputMode::Editing => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_popup(f: &mut Frame, area: Rect, title: &str, body: Vec<Line>, accent: Style) {
    let height = body.len() as u16 + 3;
    let popup_area = centered_rect(64, height, area);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(body).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(accent)
            .title(Span::styled(
                format!(" {title} "),
                accent.add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(popup, popup_area);
}

fn render_confirm(f: &mut Frame, area: Rect, app: &App) {
    let body = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", app.confirm_message),
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" [y/N] ", Style::default().fg(theme::RED))),
        Line::from(""),
    ];
    render_popup(
        f,
        area,
        &app.confirm_title,
        body,
        Style::default().fg(theme::YELLOW),
    );
}

fn render_dialog(f: &mut Frame, area: Rect, dialog: &Dialog) {
    let accent = if dialog.is_error {
        Style::default().fg(theme::RED)
    } else {
        Style::default().fg(theme::GREEN)
    };
    let body = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", dialog.message),
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Press any key ", theme::dim_style())),
    ];
    render_popup(f, area, &dialog.title, body, accent);
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let row = |text: &'static str| Line::from(Span::styled(text, theme::normal_style()));

    let mut help_text = vec![
        Line::from(""),
        section(" Form"),
        row("  a / Tab         Edit amount           d          Edit description"),
        row("  Enter           Next field / done     Esc        Stop editing"),
        Line::from(""),
        section(" Actions"),
        row("  i               Add Income            e          Add Expense"),
        row("  v               View Transactions     c          Clear inputs"),
        row("  X               Clear Database        u          Switch currency"),
        row("  :               Command mode          Ctrl-q     Quit"),
        Line::from(""),
        section(" Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<15} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));

    let popup_area = centered_rect(72, help_text.len() as u16 + 2, area);
    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(
                " Budget Tracker Help ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
