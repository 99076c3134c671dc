use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::info;

use crate::controller::{Action, Controller};
use crate::ui::app::{App, Focus, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(controller: &mut Controller) -> Result<()> {
    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    info!("terminal ui started");

    let result = run_app(&mut terminal, &mut app, controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    controller: &mut Controller,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // title + status + command bars, plus the history block borders
            let content_height = f.area().height.saturating_sub(5) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app, controller);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.dialog.is_some() {
                app.dialog = None;
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, controller),
                InputMode::Editing => handle_editing_input(key, app, controller),
                InputMode::Command => handle_command_input(key, app, controller)?,
                InputMode::Confirm => handle_confirm_input(key, app, controller),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn is_quit_key(key: &event::KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_normal_input(key: event::KeyEvent, app: &mut App, controller: &mut Controller) {
    if is_quit_key(&key) {
        app.running = false;
        return;
    }

    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => app.show_help = true,
        _ => match app.screen {
            Screen::Ledger => handle_ledger_key(key, app, controller),
            Screen::History => handle_history_key(key, app),
        },
    }
}

fn handle_ledger_key(key: event::KeyEvent, app: &mut App, controller: &mut Controller) {
    match key.code {
        KeyCode::Char('a') | KeyCode::Tab => start_editing(app, Focus::Amount),
        KeyCode::Char('d') => start_editing(app, Focus::Description),
        KeyCode::Char('i') => app.apply(controller, Action::AddIncome),
        KeyCode::Char('e') => app.apply(controller, Action::AddExpense),
        KeyCode::Char('v') => app.apply(controller, Action::ViewTransactions),
        KeyCode::Char('c') => app.apply(controller, Action::ClearInputs),
        KeyCode::Char('X') => app.apply(controller, Action::RequestClearDatabase),
        KeyCode::Char('u') => {
            let next = controller.currency().next();
            app.apply(controller, Action::SelectCurrency(next));
        }
        _ => {}
    }
}

fn handle_history_key(key: event::KeyEvent, app: &mut App) {
    let len = app.history.len();
    let page = app.visible_rows;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_down(&mut app.history_index, &mut app.history_scroll, len, page)
        }
        KeyCode::Char('k') | KeyCode::Up => scroll_up(&mut app.history_index, &mut app.history_scroll),
        KeyCode::Char('g') | KeyCode::Home => {
            scroll_to_top(&mut app.history_index, &mut app.history_scroll)
        }
        KeyCode::Char('G') | KeyCode::End => {
            scroll_to_bottom(&mut app.history_index, &mut app.history_scroll, len, page)
        }
        KeyCode::Esc | KeyCode::Char('q') => app.screen = Screen::Ledger,
        _ => {}
    }
}

fn start_editing(app: &mut App, focus: Focus) {
    app.focus = focus;
    app.input_mode = InputMode::Editing;
    app.status_message.clear();
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, controller: &mut Controller) {
    if is_quit_key(&key) {
        app.running = false;
        return;
    }
    // Other control chords are not text. Ctrl+Alt is AltGr on some layouts.
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT)
    {
        return;
    }

    let field = match app.focus {
        Focus::Amount => &mut controller.form.amount,
        Focus::Description => &mut controller.form.description,
    };
    match key.code {
        KeyCode::Char(c) => field.push(c),
        KeyCode::Backspace => {
            field.pop();
        }
        KeyCode::Tab | KeyCode::BackTab => app.focus = app.focus.toggle(),
        KeyCode::Enter if app.focus == Focus::Amount => app.focus = Focus::Description,
        KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,
        _ => {}
    }
}

fn handle_command_input(
    key: event::KeyEvent,
    app: &mut App,
    controller: &mut Controller,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, controller)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            if app.command_input.pop().is_none() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, controller: &mut Controller) {
    app.input_mode = InputMode::Normal;
    let pending = app.pending_action.take();
    match (key.code, pending) {
        (KeyCode::Char('y') | KeyCode::Char('Y'), Some(PendingAction::ClearDatabase)) => {
            app.screen = Screen::Ledger;
            app.apply(controller, Action::ClearDatabase);
        }
        _ => app.set_status("Cancelled"),
    }
}
