mod action;
mod parse;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::db::LedgerStore;
use crate::error::{ActionError, InputError, StorageError};
use crate::models::{is_storable_amount, Currency, LedgerTotals, TransactionKind};

pub(crate) use action::{Action, Outcome};
pub(crate) use parse::parse_amount;

pub(crate) const AMOUNT_PLACEHOLDER: &str = "Enter amount";
pub(crate) const DESCRIPTION_PLACEHOLDER: &str = "Enter description";

/// The two text fields of the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Form {
    pub(crate) amount: String,
    pub(crate) description: String,
}

impl Form {
    pub(crate) fn reset(&mut self) {
        self.amount.clear();
        self.description.clear();
    }
}

/// Rendered text of the totals labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Labels {
    pub(crate) income: String,
    pub(crate) expenses: String,
    pub(crate) balance: String,
}

/// A rendered history line and the kind of the transaction behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HistoryEntry {
    pub(crate) kind: TransactionKind,
    pub(crate) line: String,
}

/// Session context: owns the ledger handle, the cached totals, the display
/// currency and the form. After every successful mutation the cached totals
/// equal the store's sums.
pub(crate) struct Controller {
    store: LedgerStore,
    totals: LedgerTotals,
    currency: Currency,
    labels: Labels,
    pub(crate) form: Form,
}

impl Controller {
    pub(crate) fn open(store: LedgerStore) -> Result<Self, StorageError> {
        let totals = store.totals()?;
        info!(income = %totals.income, expenses = %totals.expenses, "loaded totals");
        let mut controller = Self {
            store,
            totals,
            currency: Currency::default(),
            labels: Labels::default(),
            form: Form::default(),
        };
        controller.refresh_display();
        Ok(controller)
    }

    pub(crate) fn totals(&self) -> LedgerTotals {
        self.totals
    }

    pub(crate) fn currency(&self) -> Currency {
        self.currency
    }

    pub(crate) fn labels(&self) -> &Labels {
        &self.labels
    }

    pub(crate) fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub(crate) fn record_income(
        &mut self,
        raw_amount: &str,
        description: &str,
    ) -> Result<Outcome, ActionError> {
        self.record(TransactionKind::Income, raw_amount, description)
    }

    pub(crate) fn record_expense(
        &mut self,
        raw_amount: &str,
        description: &str,
    ) -> Result<Outcome, ActionError> {
        self.record(TransactionKind::Expense, raw_amount, description)
    }

    fn record(
        &mut self,
        kind: TransactionKind,
        raw_amount: &str,
        description: &str,
    ) -> Result<Outcome, ActionError> {
        let amount = parse_amount(raw_amount).map_err(|e| {
            warn!(input = raw_amount, "rejected amount");
            e
        })?;

        if description.is_empty() {
            warn!(kind = kind.as_str(), "ignored transaction without description");
            return Ok(Outcome::Ignored);
        }

        // Checked before the write so an out-of-range amount never reaches the file
        let next = Some(amount)
            .filter(|a| is_storable_amount(*a))
            .and_then(|a| self.totals.recorded(kind, a))
            .ok_or_else(|| {
                warn!(input = raw_amount, kind = kind.as_str(), "amount out of range");
                InputError::AmountOutOfRange(raw_amount.to_string())
            })?;

        // Cache follows the write so a failed insert leaves both untouched
        let id = self.store.append(amount, kind, description)?;
        self.totals = next;
        debug!(id, kind = kind.as_str(), total = %self.totals.get(kind), "recorded transaction");
        self.refresh_display();
        Ok(Outcome::Recorded { id, kind, amount })
    }

    /// Switch the display format. Stored amounts are not touched.
    pub(crate) fn set_display_currency(&mut self, currency: Currency) {
        debug!(from = %self.currency, to = %currency, "display currency changed");
        self.currency = currency;
        self.refresh_display();
    }

    /// Re-render the totals labels and reset the form to its placeholders.
    pub(crate) fn refresh_display(&mut self) {
        let fmt = |amount: Decimal| self.currency.format(amount);
        self.labels = Labels {
            income: format!("Total Income: {}", fmt(self.totals.income)),
            expenses: format!("Total Expenses: {}", fmt(self.totals.expenses)),
            balance: format!("Spare Income: {}", fmt(self.totals.balance())),
        };
        self.form.reset();
    }

    pub(crate) fn clear_inputs(&mut self) {
        self.form.reset();
    }

    /// One line per transaction, newest first, in the current display currency.
    pub(crate) fn show_history(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        Ok(self
            .store
            .list_all()?
            .iter()
            .map(|txn| HistoryEntry {
                kind: txn.kind,
                line: txn.history_line(self.currency),
            })
            .collect())
    }

    /// Delete every transaction and zero the totals. Callers confirm first.
    pub(crate) fn reset_all(&mut self) -> Result<usize, StorageError> {
        let removed = self.store.clear_all()?;
        self.totals.reset();
        self.refresh_display();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests;
