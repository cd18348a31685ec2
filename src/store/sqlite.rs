use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use super::{schema, RecordStore};
use crate::error::{Error, Result};
use crate::models::*;

pub(crate) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let mut store = Self { conn };
        store.migrate()?;
        info!(path = %path.display(), "Opened record store");
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
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
            debug!(version = schema::CURRENT_VERSION, "Created schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        let tx = self.conn.transaction()?;
        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                debug!(from_version, "Applying migration");
                tx.execute_batch(sql)?;
            }
        }
        if current < schema::CURRENT_VERSION {
            tx.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }
}

// ── Row decoding ──────────────────────────────────────────────

fn text_col<T>(row: &Row, idx: usize, parse: impl Fn(&str) -> Result<T>) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    parse(&s).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn decimal_col(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    text_col(row, idx, |s| {
        Decimal::from_str(s).map_err(|_| Error::InvalidAmount(s.to_string()))
    })
}

fn income_from_row(row: &Row) -> rusqlite::Result<IncomeEntry> {
    Ok(IncomeEntry {
        id: row.get(0)?,
        month: text_col(row, 1, Month::parse)?,
        amount: decimal_col(row, 2)?,
    })
}

fn expense_from_row(row: &Row) -> rusqlite::Result<ExpenseEntry> {
    Ok(ExpenseEntry {
        id: row.get(0)?,
        month: text_col(row, 1, Month::parse)?,
        category: text_col(row, 2, ExpenseCategory::parse)?,
        amount: decimal_col(row, 3)?,
        expense_type: text_col(row, 4, ExpenseType::parse)?,
    })
}

fn prediction_from_row(row: &Row) -> rusqlite::Result<PredictionEntry> {
    Ok(PredictionEntry {
        id: row.get(0)?,
        month: text_col(row, 1, Month::parse)?,
        total_income: decimal_col(row, 2)?,
        total_spending: decimal_col(row, 3)?,
        savings_ratio: decimal_col(row, 4)?,
        essential_ratio: decimal_col(row, 5)?,
        non_essential_ratio: decimal_col(row, 6)?,
        expense_growth_rate: decimal_col(row, 7)?,
        risk_level: text_col(row, 8, RiskLevel::parse)?,
        created_at: row.get(9)?,
    })
}

fn ensure_changed(changed: usize, kind: &'static str, id: &str) -> Result<()> {
    if changed == 0 {
        return Err(Error::NotFound {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}

impl RecordStore for SqliteStore {
    // ── Income ────────────────────────────────────────────────

    fn list_income(&self) -> Result<Vec<IncomeEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, month, amount FROM income ORDER BY seq")?;
        let rows = stmt.query_map([], income_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn append_income(&mut self, entry: &IncomeEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO income (id, month, amount) VALUES (?1, ?2, ?3)",
            params![entry.id, entry.month.to_string(), entry.amount.to_string()],
        )?;
        debug!(id = %entry.id, month = %entry.month, amount = %entry.amount, "Appended income");
        Ok(())
    }

    fn update_income(&mut self, entry: &IncomeEntry) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE income SET month = ?1, amount = ?2 WHERE id = ?3",
            params![entry.month.to_string(), entry.amount.to_string(), entry.id],
        )?;
        ensure_changed(changed, "income", &entry.id)
    }

    fn delete_income(&mut self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM income WHERE id = ?1", params![id])?;
        ensure_changed(changed, "income", id)
    }

    // ── Expenses ──────────────────────────────────────────────

    fn list_expenses(&self) -> Result<Vec<ExpenseEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, month, category, amount, expense_type FROM expenses ORDER BY seq",
        )?;
        let rows = stmt.query_map([], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn append_expense(&mut self, entry: &ExpenseEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO expenses (id, month, category, amount, expense_type)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.id,
                entry.month.to_string(),
                entry.category.as_str(),
                entry.amount.to_string(),
                entry.expense_type.as_str(),
            ],
        )?;
        debug!(
            id = %entry.id,
            month = %entry.month,
            category = %entry.category,
            amount = %entry.amount,
            "Appended expense"
        );
        Ok(())
    }

    fn update_expense(&mut self, entry: &ExpenseEntry) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE expenses SET month = ?1, category = ?2, amount = ?3, expense_type = ?4
             WHERE id = ?5",
            params![
                entry.month.to_string(),
                entry.category.as_str(),
                entry.amount.to_string(),
                entry.expense_type.as_str(),
                entry.id,
            ],
        )?;
        ensure_changed(changed, "expense", &entry.id)
    }

    fn delete_expense(&mut self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        ensure_changed(changed, "expense", id)
    }

    fn import_income(&mut self, entries: &[IncomeEntry]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut count = 0;
        for entry in entries {
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM income WHERE id = ?1)",
                params![entry.id],
                |row| row.get(0),
            )?;
            if exists {
                continue;
            }
            tx.execute(
                "INSERT INTO income (id, month, amount) VALUES (?1, ?2, ?3)",
                params![entry.id, entry.month.to_string(), entry.amount.to_string()],
            )?;
            count += 1;
        }
        tx.commit()?;
        info!(count, skipped = entries.len() - count, "Imported income");
        Ok(count)
    }

    fn import_expenses(&mut self, entries: &[ExpenseEntry]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut count = 0;
        for entry in entries {
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM expenses WHERE id = ?1)",
                params![entry.id],
                |row| row.get(0),
            )?;
            if exists {
                continue;
            }
            tx.execute(
                "INSERT INTO expenses (id, month, category, amount, expense_type)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    entry.id,
                    entry.month.to_string(),
                    entry.category.as_str(),
                    entry.amount.to_string(),
                    entry.expense_type.as_str(),
                ],
            )?;
            count += 1;
        }
        tx.commit()?;
        info!(count, skipped = entries.len() - count, "Imported expenses");
        Ok(count)
    }

    // ── Predictions ───────────────────────────────────────────

    fn list_predictions(&self) -> Result<Vec<PredictionEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, month, total_income, total_spending, savings_ratio, essential_ratio,
                    non_essential_ratio, expense_growth_rate, risk_level, created_at
             FROM predictions ORDER BY seq",
        )?;
        let rows = stmt.query_map([], prediction_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn append_prediction(&mut self, entry: &PredictionEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO predictions (id, month, total_income, total_spending, savings_ratio,
                                      essential_ratio, non_essential_ratio, expense_growth_rate,
                                      risk_level, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                entry.id,
                entry.month.to_string(),
                entry.total_income.to_string(),
                entry.total_spending.to_string(),
                entry.savings_ratio.to_string(),
                entry.essential_ratio.to_string(),
                entry.non_essential_ratio.to_string(),
                entry.expense_growth_rate.to_string(),
                entry.risk_level.as_str(),
                entry.created_at,
            ],
        )?;
        Ok(())
    }

    fn delete_prediction(&mut self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM predictions WHERE id = ?1", params![id])?;
        ensure_changed(changed, "prediction", id)
    }

    /// Read all three collections inside one transaction so they agree.
    fn snapshot(&self) -> Result<super::Snapshot> {
        self.conn.execute_batch("BEGIN DEFERRED")?;
        let result = (|| {
            Ok(super::Snapshot {
                income: self.list_income()?,
                expenses: self.list_expenses()?,
                predictions: self.list_predictions()?,
            })
        })();
        self.conn.execute_batch("COMMIT")?;
        result
    }
}
