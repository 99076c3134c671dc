use rust_decimal::Decimal;

use super::TransactionKind;

/// Running income and expense sums over every stored transaction.
///
/// Totals built through [`LedgerTotals::checked`] or
/// [`LedgerTotals::recorded`] always have a representable balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl LedgerTotals {
    pub fn new(income: Decimal, expenses: Decimal) -> Self {
        Self { income, expenses }
    }

    /// `None` when the balance of the two sums would overflow.
    pub fn checked(income: Decimal, expenses: Decimal) -> Option<Self> {
        income.checked_sub(expenses)?;
        Some(Self::new(income, expenses))
    }

    /// Spare income: what is left after expenses.
    pub fn balance(&self) -> Decimal {
        self.income.saturating_sub(self.expenses)
    }

    pub fn get(&self, kind: TransactionKind) -> Decimal {
        match kind {
            TransactionKind::Income => self.income,
            TransactionKind::Expense => self.expenses,
        }
    }

    /// The totals after one more transaction, or `None` if a sum or the
    /// balance would leave the decimal range. `self` is never modified.
    pub fn recorded(&self, kind: TransactionKind, amount: Decimal) -> Option<Self> {
        match kind {
            TransactionKind::Income => Self::checked(self.income.checked_add(amount)?, self.expenses),
            TransactionKind::Expense => {
                Self::checked(self.income, self.expenses.checked_add(amount)?)
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
