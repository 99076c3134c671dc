use rust_decimal::Decimal;

use super::{Controller, HistoryEntry};
use crate::error::ActionError;
use crate::models::{Currency, TransactionKind};

pub(crate) const CLEAR_DATABASE_TITLE: &str = "Clear Database";
pub(crate) const CLEAR_DATABASE_PROMPT: &str =
    "Are you sure you want to delete all transactions? This action cannot be undone.";
pub(crate) const CLEARED_NOTICE: &str = "All transactions have been deleted.";

/// Everything a user can ask the ledger screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// Record the form contents as income.
    AddIncome,
    /// Record the form contents as an expense.
    AddExpense,
    ViewTransactions,
    /// Reset the form fields only.
    ClearInputs,
    SelectCurrency(Currency),
    /// Ask before wiping the ledger. Never mutates.
    RequestClearDatabase,
    /// Wipe the ledger. Only dispatched once the user has confirmed.
    ClearDatabase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Recorded {
        id: i64,
        kind: TransactionKind,
        amount: Decimal,
    },
    /// The description was empty; nothing was recorded.
    Ignored,
    History(Vec<HistoryEntry>),
    InputsCleared,
    CurrencyChanged(Currency),
    ConfirmClearDatabase {
        title: &'static str,
        prompt: &'static str,
    },
    DatabaseCleared {
        removed: usize,
        notice: &'static str,
    },
}

impl Controller {
    pub(crate) fn dispatch(&mut self, action: Action) -> Result<Outcome, ActionError> {
        match action {
            Action::AddIncome => {
                let (amount, description) =
                    (self.form.amount.clone(), self.form.description.clone());
                self.record_income(&amount, &description)
            }
            Action::AddExpense => {
                let (amount, description) =
                    (self.form.amount.clone(), self.form.description.clone());
                self.record_expense(&amount, &description)
            }
            Action::ViewTransactions => Ok(Outcome::History(self.show_history()?)),
            Action::ClearInputs => {
                self.clear_inputs();
                Ok(Outcome::InputsCleared)
            }
            Action::SelectCurrency(currency) => {
                self.set_display_currency(currency);
                Ok(Outcome::CurrencyChanged(currency))
            }
            Action::RequestClearDatabase => Ok(Outcome::ConfirmClearDatabase {
                title: CLEAR_DATABASE_TITLE,
                prompt: CLEAR_DATABASE_PROMPT,
            }),
            Action::ClearDatabase => {
                let removed = self.reset_all()?;
                Ok(Outcome::DatabaseCleared {
                    removed,
                    notice: CLEARED_NOTICE,
                })
            }
        }
    }
}
