#![allow(clippy::unwrap_used, clippy::panic)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::action::{CLEARED_NOTICE, CLEAR_DATABASE_PROMPT};
use super::*;
use crate::error::InputError;

fn controller() -> Controller {
    Controller::open(LedgerStore::open_in_memory().unwrap()).unwrap()
}

fn fill(c: &mut Controller, amount: &str, description: &str) {
    c.form.amount = amount.into();
    c.form.description = description.into();
}

fn store_balance(c: &Controller) -> Decimal {
    c.store().sum_by_kind(TransactionKind::Income).unwrap()
        - c.store().sum_by_kind(TransactionKind::Expense).unwrap()
}

// ── Opening ───────────────────────────────────────────────────

#[test]
fn test_open_empty_ledger() {
    let c = controller();
    assert_eq!(c.totals(), LedgerTotals::default());
    assert_eq!(c.currency(), Currency::Usd);
    assert_eq!(c.labels().income, "Total Income: $0.00");
    assert_eq!(c.labels().expenses, "Total Expenses: $0.00");
    assert_eq!(c.labels().balance, "Spare Income: $0.00");
}

#[test]
fn test_open_loads_existing_totals() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.append(dec!(500), TransactionKind::Income, "Bonus").unwrap();
    store.append(dec!(120.40), TransactionKind::Expense, "Phone").unwrap();

    let c = Controller::open(store).unwrap();
    assert_eq!(c.totals(), LedgerTotals::new(dec!(500), dec!(120.40)));
    assert_eq!(c.labels().balance, "Spare Income: $379.60");
}

// ── Recording ─────────────────────────────────────────────────

#[test]
fn test_salary_and_groceries_scenario() {
    let mut c = controller();
    c.record_income("1000.00", "Salary").unwrap();
    c.record_expense("250.75", "Groceries").unwrap();

    let totals = c.totals();
    assert_eq!(totals.income, dec!(1000.00));
    assert_eq!(totals.expenses, dec!(250.75));
    assert_eq!(totals.balance(), dec!(749.25));
    assert_eq!(c.labels().income, "Total Income: $1,000.00");
    assert_eq!(c.labels().expenses, "Total Expenses: $250.75");
    assert_eq!(c.labels().balance, "Spare Income: $749.25");

    let listed = c.store().list_all().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].description, "Groceries");
    assert_eq!(listed[1].description, "Salary");

    let history = c.show_history().unwrap();
    assert_eq!(history[0].kind, TransactionKind::Expense);
    assert!(history[0].line.starts_with("Expense - $250.75 - Groceries - "));
    assert_eq!(history[1].kind, TransactionKind::Income);
    assert!(history[1].line.starts_with("Income - $1,000.00 - Salary - "));
}

#[test]
fn test_record_returns_outcome() {
    let mut c = controller();
    let outcome = c.record_expense("1,234.50", "Laptop").unwrap();
    match outcome {
        Outcome::Recorded { id, kind, amount } => {
            assert!(id > 0);
            assert_eq!(kind, TransactionKind::Expense);
            assert_eq!(amount, dec!(1234.50));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_invalid_amount_mutates_nothing() {
    let mut c = controller();
    fill(&mut c, "abc", "Lunch");

    let err = c.dispatch(Action::AddExpense).unwrap_err();
    assert!(matches!(
        err,
        ActionError::Input(InputError::InvalidAmount(ref s)) if s == "abc"
    ));
    assert_eq!(err.title(), "Input Error");
    assert_eq!(err.to_string(), "Please enter a valid number.");

    assert_eq!(c.store().count().unwrap(), 0);
    assert_eq!(c.totals(), LedgerTotals::default());
    // The form is left as typed so the user can correct it
    assert_eq!(c.form.amount, "abc");
    assert_eq!(c.form.description, "Lunch");
}

#[test]
fn test_empty_description_is_silently_dropped() {
    let mut c = controller();
    let outcome = c.record_income("50", "").unwrap();
    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(c.store().count().unwrap(), 0);
    assert_eq!(c.totals(), LedgerTotals::default());
}

#[test]
fn test_invalid_amount_wins_over_empty_description() {
    let mut c = controller();
    assert!(c.record_income("oops", "").is_err());
}

#[test]
fn test_whitespace_description_is_recorded() {
    let mut c = controller();
    c.record_income("5", " ").unwrap();
    assert_eq!(c.store().count().unwrap(), 1);
}

#[test]
fn test_non_positive_amounts_are_accepted() {
    let mut c = controller();
    c.record_income("0", "Nothing").unwrap();
    c.record_expense("-20", "Refund").unwrap();
    assert_eq!(c.totals().expenses, dec!(-20));
    assert_eq!(c.totals().balance(), dec!(20));
}

#[test]
fn test_successful_add_clears_form() {
    let mut c = controller();
    fill(&mut c, "12", "Book");
    c.dispatch(Action::AddIncome).unwrap();
    assert_eq!(c.form, Form::default());
}

#[test]
fn test_storage_failure_leaves_cache_untouched() {
    let mut c = controller();
    c.record_income("100", "Gift").unwrap();
    c.store().conn().execute_batch("DROP TABLE transactions;").unwrap();
    fill(&mut c, "40", "Dinner");

    let err = c.dispatch(Action::AddExpense).unwrap_err();
    assert!(matches!(err, ActionError::Storage(_)));
    assert_eq!(err.title(), "Storage Error");
    assert_eq!(c.totals(), LedgerTotals::new(dec!(100), Decimal::ZERO));
    assert_eq!(c.form.amount, "40");
}

// ── Range ─────────────────────────────────────────────────────

fn big() -> Decimal {
    Decimal::from_scientific("5e28").unwrap()
}

fn controller_near_max() -> Controller {
    let store = LedgerStore::open_in_memory().unwrap();
    store.append(big(), TransactionKind::Income, "Windfall").unwrap();
    Controller::open(store).unwrap()
}

#[test]
fn test_amount_beyond_stored_precision_is_rejected() {
    let mut c = controller();
    let err = c
        .record_income("79,228,162,514,264,337,593,543,950,335", "Lottery")
        .unwrap_err();

    assert!(matches!(err, ActionError::Input(InputError::AmountOutOfRange(_))));
    assert_eq!(err.title(), "Input Error");
    assert_eq!(c.store().count().unwrap(), 0);
    assert_eq!(c.totals(), LedgerTotals::default());
}

#[test]
fn test_income_overflowing_totals_is_rejected_before_write() {
    let mut c = controller_near_max();
    fill(&mut c, "5e28", "Again");

    let err = c.dispatch(Action::AddIncome).unwrap_err();

    assert!(matches!(err, ActionError::Input(InputError::AmountOutOfRange(_))));
    assert_eq!(c.store().count().unwrap(), 1);
    assert_eq!(c.totals(), LedgerTotals::new(big(), Decimal::ZERO));
    assert_eq!(c.totals(), c.store().totals().unwrap());
    assert_eq!(c.form.amount, "5e28");
}

#[test]
fn test_negative_expense_overflowing_balance_is_rejected() {
    let mut c = controller_near_max();

    let err = c.record_expense("-5e28", "Refund").unwrap_err();

    assert!(matches!(err, ActionError::Input(InputError::AmountOutOfRange(_))));
    assert_eq!(c.store().count().unwrap(), 1);
    assert_eq!(c.totals(), c.store().totals().unwrap());
    assert_eq!(c.labels().balance, "Spare Income: $50,000,000,000,000,000,000,000,000,000.00");
}

#[test]
fn test_open_reports_ledger_with_overflowing_totals() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.append(big(), TransactionKind::Income, "a").unwrap();
    store.append(big(), TransactionKind::Income, "b").unwrap();

    assert!(matches!(
        Controller::open(store),
        Err(StorageError::TotalsOverflow)
    ));
}

#[test]
fn test_open_overflowing_ledger_file_fails_on_every_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budget.db");
    {
        let store = LedgerStore::open(&path).unwrap();
        store.append(big(), TransactionKind::Income, "a").unwrap();
        store.append(big(), TransactionKind::Income, "b").unwrap();
    }

    for _ in 0..2 {
        let store = LedgerStore::open(&path).unwrap();
        assert!(Controller::open(store).is_err());
    }
}

// ── Cache consistency ─────────────────────────────────────────

#[test]
fn test_cached_balance_matches_store_after_every_step() {
    let mut c = controller();
    let steps: &[(TransactionKind, &str, &str)] = &[
        (TransactionKind::Income, "2,500.00", "Salary"),
        (TransactionKind::Expense, "800", "Rent"),
        (TransactionKind::Expense, "not a number", "Typo"),
        (TransactionKind::Expense, "63.17", ""),
        (TransactionKind::Expense, "63.17", "Utilities"),
        (TransactionKind::Income, "0.01", "Interest"),
        (TransactionKind::Expense, "1e2", "Shoes"),
    ];

    let mut appended = 0;
    for (kind, amount, description) in steps {
        fill(&mut c, amount, description);
        let action = match kind {
            TransactionKind::Income => Action::AddIncome,
            TransactionKind::Expense => Action::AddExpense,
        };
        if let Ok(Outcome::Recorded { .. }) = c.dispatch(action) {
            appended += 1;
        }
        assert_eq!(c.totals().balance(), store_balance(&c));
        assert_eq!(c.totals(), c.store().totals().unwrap());
        assert_eq!(c.store().list_all().unwrap().len(), appended);
    }

    assert_eq!(appended, 5);
    assert_eq!(c.totals().income, dec!(2500.01));
    assert_eq!(c.totals().expenses, dec!(963.17));
}

// ── Display ───────────────────────────────────────────────────

#[test]
fn test_currency_switch_only_changes_formatting() {
    let mut c = controller();
    c.record_income("1234.5", "Consulting").unwrap();

    let outcome = c.dispatch(Action::SelectCurrency(Currency::Eur)).unwrap();
    assert_eq!(outcome, Outcome::CurrencyChanged(Currency::Eur));
    assert_eq!(c.labels().income, "Total Income: 1.234,50 €");
    assert_eq!(c.labels().balance, "Spare Income: 1.234,50 €");
    assert_eq!(c.totals().income, dec!(1234.5));
    assert_eq!(c.store().list_all().unwrap()[0].amount, dec!(1234.5));

    c.set_display_currency(Currency::Gbp);
    assert_eq!(c.labels().income, "Total Income: £1,234.50");
}

#[test]
fn test_history_uses_current_currency() {
    let mut c = controller();
    c.record_expense("9.99", "Coffee beans").unwrap();
    c.set_display_currency(Currency::Eur);

    let Outcome::History(lines) = c.dispatch(Action::ViewTransactions).unwrap() else {
        panic!("expected history");
    };
    assert_eq!(lines.len(), 1);
    assert!(lines[0].line.starts_with("Expense - 9,99 € - Coffee beans - "));
}

#[test]
fn test_history_empty() {
    let c = controller();
    assert!(c.show_history().unwrap().is_empty());
}

#[test]
fn test_negative_balance_label() {
    let mut c = controller();
    c.record_expense("75", "Concert").unwrap();
    assert_eq!(c.labels().balance, "Spare Income: -$75.00");
}

#[test]
fn test_clear_inputs_only_resets_form() {
    let mut c = controller();
    c.record_income("10", "Gift").unwrap();
    fill(&mut c, "5", "half typed");

    assert_eq!(c.dispatch(Action::ClearInputs).unwrap(), Outcome::InputsCleared);
    assert_eq!(c.form, Form::default());
    assert_eq!(c.store().count().unwrap(), 1);
    assert_eq!(c.totals().income, dec!(10));
}

#[test]
fn test_refresh_display_resets_form() {
    let mut c = controller();
    fill(&mut c, "5", "something");
    c.refresh_display();
    assert!(c.form.amount.is_empty());
    assert!(c.form.description.is_empty());
}

// ── Clearing the ledger ───────────────────────────────────────

#[test]
fn test_request_clear_database_does_not_mutate() {
    let mut c = controller();
    c.record_income("10", "Gift").unwrap();

    let outcome = c.dispatch(Action::RequestClearDatabase).unwrap();
    assert_eq!(
        outcome,
        Outcome::ConfirmClearDatabase {
            title: "Clear Database",
            prompt: CLEAR_DATABASE_PROMPT,
        }
    );
    assert_eq!(c.store().count().unwrap(), 1);
    assert_eq!(c.totals().income, dec!(10));
}

#[test]
fn test_clear_database_resets_everything() {
    let mut c = controller();
    c.record_income("1000", "Salary").unwrap();
    c.record_expense("250.75", "Groceries").unwrap();

    let outcome = c.dispatch(Action::ClearDatabase).unwrap();
    assert_eq!(
        outcome,
        Outcome::DatabaseCleared {
            removed: 2,
            notice: CLEARED_NOTICE,
        }
    );
    assert_eq!(c.totals(), LedgerTotals::default());
    assert_eq!(c.store().sum_by_kind(TransactionKind::Income).unwrap(), Decimal::ZERO);
    assert_eq!(c.store().sum_by_kind(TransactionKind::Expense).unwrap(), Decimal::ZERO);
    assert!(c.store().list_all().unwrap().is_empty());
    assert_eq!(c.labels().balance, "Spare Income: $0.00");
}

#[test]
fn test_appends_after_clear_start_from_zero() {
    let mut c = controller();
    c.record_income("1000", "Salary").unwrap();
    c.reset_all().unwrap();
    c.record_expense("5", "Snack").unwrap();

    assert_eq!(c.totals(), LedgerTotals::new(Decimal::ZERO, dec!(5)));
    assert_eq!(c.store().list_all().unwrap().len(), 1);
    assert_eq!(c.totals().balance(), store_balance(&c));
}
