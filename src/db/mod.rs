mod schema;

use chrono::{Local, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::*;

type Result<T> = std::result::Result<T, StorageError>;

/// The on-disk ledger: a single table of immutable transactions.
pub(crate) struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let store = Self { conn };
        store.initialize()?;
        info!(path = %path.display(), "opened ledger");
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Make sure the schema exists and is current. Safe to call any number of times.
    pub(crate) fn initialize(&self) -> Result<()> {
        self.migrate().map_err(StorageError::Migration)
    }

    fn migrate(&self) -> rusqlite::Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            debug!(version = schema::CURRENT_VERSION, "created ledger schema");
            return Ok(());
        }

        let current: Option<i32> = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(current) = current else {
            // Version row lost; the tables are created with IF NOT EXISTS so re-applying is harmless
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        };

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            debug!(from = current, to = schema::CURRENT_VERSION, "migrated ledger schema");
        }

        Ok(())
    }

    // ── Writes ────────────────────────────────────────────────

    /// Append one transaction stamped with the current local time.
    pub(crate) fn append(
        &self,
        amount: Decimal,
        kind: TransactionKind,
        description: &str,
    ) -> Result<i64> {
        self.append_at(amount, kind, description, Local::now().naive_local())
    }

    pub(crate) fn append_at(
        &self,
        amount: Decimal,
        kind: TransactionKind,
        description: &str,
        at: NaiveDateTime,
    ) -> Result<i64> {
        if !is_storable_amount(amount) {
            return Err(StorageError::InexactAmount(amount));
        }
        let date = at.format(TIMESTAMP_FORMAT).to_string();
        self.conn.execute(
            "INSERT INTO transactions (amount, kind, description, date)
             VALUES (?1, ?2, ?3, ?4)",
            params![amount.to_string(), kind, description, date],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, %amount, kind = kind.as_str(), "appended transaction");
        Ok(id)
    }

    /// Irreversibly delete every transaction. Returns the number of rows removed.
    pub(crate) fn clear_all(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM transactions", [])?;
        info!(removed, "cleared ledger");
        Ok(removed)
    }

    // ── Reads ─────────────────────────────────────────────────

    /// Exact sum of `amount` over rows of one kind; zero when there are none.
    pub(crate) fn sum_by_kind(&self, kind: TransactionKind) -> Result<Decimal> {
        let mut stmt = self
            .conn
            .prepare("SELECT amount FROM transactions WHERE kind = ?1")?;
        let amounts = stmt.query_map(params![kind], |row| decimal_column(row, 0))?;

        let mut total = Decimal::ZERO;
        for amount in amounts {
            total = total
                .checked_add(amount?)
                .ok_or(StorageError::TotalsOverflow)?;
        }
        Ok(total)
    }

    /// Both sums, failing if their balance is not representable.
    pub(crate) fn totals(&self) -> Result<LedgerTotals> {
        LedgerTotals::checked(
            self.sum_by_kind(TransactionKind::Income)?,
            self.sum_by_kind(TransactionKind::Expense)?,
        )
        .ok_or(StorageError::TotalsOverflow)
    }

    /// Every transaction, newest first. Rows stamped within the same second
    /// keep insertion order reversed.
    pub(crate) fn list_all(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, kind, description, date
             FROM transactions
             ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Transaction {
                id: row.get(0)?,
                amount: decimal_column(row, 1)?,
                kind: row.get(2)?,
                description: row.get(3)?,
                created_at: timestamp_column(row, 4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }
}

/// NUMERIC affinity hands amounts back as INTEGER, REAL or (when SQLite could
/// not convert the text) TEXT. Stored amounts have at most 15 significant
/// digits, so the shortest decimal form of a REAL is the value written.
fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let (parsed, ty) = match row.get_ref(idx)? {
        ValueRef::Integer(i) => return Ok(Decimal::from(i)),
        ValueRef::Real(f) => (Decimal::from_str(&f.to_string()), Type::Real),
        ValueRef::Text(raw) => {
            let raw = std::str::from_utf8(raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })?;
            (Decimal::from_str(raw), Type::Text)
        }
        other => {
            return Err(rusqlite::Error::InvalidColumnType(
                idx,
                "amount".into(),
                other.data_type(),
            ))
        }
    };
    parsed.map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, ty, Box::new(e)))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_str()?;
        Self::parse(raw)
            .ok_or_else(|| FromSqlError::Other(format!("unknown transaction kind: {raw}").into()))
    }
}
