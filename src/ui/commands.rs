use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::controller::{Action, Controller};
use crate::error::InputError;
use crate::models::Currency;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Controller) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!(
        "income",
        "Add income (e.g. :income 1,200 Salary)",
        cmd_income,
        r
    );
    register_command!("i", "Add income (e.g. :i 1,200 Salary)", cmd_income, r);
    register_command!(
        "expense",
        "Add expense (e.g. :expense 4.50 Coffee)",
        cmd_expense,
        r
    );
    register_command!("e", "Add expense (e.g. :e 4.50 Coffee)", cmd_expense, r);
    register_command!("history", "View transactions", cmd_history, r);
    register_command!("v", "View transactions", cmd_history, r);
    register_command!("clear", "Clear input fields", cmd_clear, r);
    register_command!(
        "clear-db",
        "Delete all transactions (asks first)",
        cmd_clear_db,
        r
    );
    register_command!(
        "currency",
        "Set display currency (e.g. :currency EUR)",
        cmd_currency,
        r
    );
    register_command!("cur", "Set display currency", cmd_currency, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    controller: &mut Controller,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, controller)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// `<amount> <description…>` fills the form before recording; with no
/// arguments whatever is already in the form is used.
fn fill_form(args: &str, controller: &mut Controller) {
    if args.is_empty() {
        return;
    }
    let mut parts = args.splitn(2, ' ');
    controller.form.amount = parts.next().unwrap_or("").to_string();
    controller.form.description = parts.next().unwrap_or("").trim().to_string();
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _controller: &mut Controller) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_income(args: &str, app: &mut App, controller: &mut Controller) -> anyhow::Result<()> {
    fill_form(args, controller);
    app.apply(controller, Action::AddIncome);
    Ok(())
}

fn cmd_expense(args: &str, app: &mut App, controller: &mut Controller) -> anyhow::Result<()> {
    fill_form(args, controller);
    app.apply(controller, Action::AddExpense);
    Ok(())
}

fn cmd_history(_args: &str, app: &mut App, controller: &mut Controller) -> anyhow::Result<()> {
    app.apply(controller, Action::ViewTransactions);
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, controller: &mut Controller) -> anyhow::Result<()> {
    app.screen = Screen::Ledger;
    app.apply(controller, Action::ClearInputs);
    Ok(())
}

fn cmd_clear_db(_args: &str, app: &mut App, controller: &mut Controller) -> anyhow::Result<()> {
    app.apply(controller, Action::RequestClearDatabase);
    Ok(())
}

fn cmd_currency(args: &str, app: &mut App, controller: &mut Controller) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!(
            "Currency: {} (options: USD, EUR, GBP)",
            controller.currency()
        ));
        return Ok(());
    }
    match Currency::parse(args) {
        Some(currency) => app.apply(controller, Action::SelectCurrency(currency)),
        None => app.set_status(InputError::UnknownCurrency(args.to_string()).to_string()),
    }
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _controller: &mut Controller) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}
