use std::path::PathBuf;

use thiserror::Error;

/// Failure of the underlying ledger file. Fatal for the action that hit it.
#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("Failed to open ledger at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Ledger schema migration failed: {0}")]
    Migration(#[source] rusqlite::Error),
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Amount {0} cannot be stored without rounding")]
    InexactAmount(rust_decimal::Decimal),
    #[error("Ledger totals exceed the supported range")]
    TotalsOverflow,
}

/// User-supplied input that could not be accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("Please enter a valid number.")]
    InvalidAmount(String),
    #[error("Amount is out of range for this ledger.")]
    AmountOutOfRange(String),
    #[error("Unknown currency: {0} (expected USD, EUR or GBP)")]
    UnknownCurrency(String),
}

/// Anything a dispatched action can fail with.
#[derive(Debug, Error)]
pub(crate) enum ActionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ActionError {
    /// Dialog title shown by the front-end.
    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::Input(_) => "Input Error",
            Self::Storage(_) => "Storage Error",
        }
    }
}
