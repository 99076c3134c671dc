mod currency;
mod totals;
mod transaction;

pub use currency::Currency;
pub use totals::LedgerTotals;
pub use transaction::{is_storable_amount, Transaction, TransactionKind, TIMESTAMP_FORMAT};
