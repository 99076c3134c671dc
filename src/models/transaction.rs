use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::Currency;

/// Storage and display format of `Transaction::created_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Most significant digits an amount may carry. SQLite keeps 15 digits when
/// it converts text into a NUMERIC column, so anything longer would be rounded.
pub const MAX_AMOUNT_DIGITS: u32 = 15;

/// Whether `amount` survives a round trip through the ledger file unchanged.
pub fn is_storable_amount(amount: Decimal) -> bool {
    let mut mantissa = amount.mantissa().unsigned_abs();
    while mantissa != 0 && mantissa % 10 == 0 {
        mantissa /= 10;
    }
    let digits = mantissa.checked_ilog10().map_or(1, |d| d + 1);
    digits <= MAX_AMOUNT_DIGITS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Value stored in the `kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A recorded transaction. Rows are never updated once written.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub description: String,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    pub fn timestamp(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `"<Kind> - <Amount> - <Description> - <Timestamp>"`, amount formatted
    /// with whatever currency is selected at display time.
    pub fn history_line(&self, currency: Currency) -> String {
        format!(
            "{} - {} - {} - {}",
            self.kind,
            currency.format(self.amount),
            self.description,
            self.timestamp()
        )
    }
}
