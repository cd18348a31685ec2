//! Persistence for the three record collections.
//!
//! The risk engine never touches storage. Callers read a [`Snapshot`] from a
//! [`RecordStore`] and hand the collections to the engine, so any backend
//! (SQLite on disk, in-memory) can sit behind the trait.

mod memory;
mod schema;
mod sqlite;

pub(crate) use memory::MemoryStore;
pub(crate) use sqlite::SqliteStore;

use crate::error::Result;
use crate::models::{ExpenseEntry, IncomeEntry, PredictionEntry};

/// A fully-read, consistent copy of every collection.
#[derive(Debug, Clone, Default)]
pub(crate) struct Snapshot {
    pub(crate) income: Vec<IncomeEntry>,
    pub(crate) expenses: Vec<ExpenseEntry>,
    pub(crate) predictions: Vec<PredictionEntry>,
}

/// List/append/update/delete per collection. Lists return records in the
/// order they were appended. Updating or deleting an unknown identifier is
/// an [`Error::NotFound`](crate::error::Error::NotFound).
///
/// Implementations are single-writer; nothing here locks.
pub(crate) trait RecordStore {
    fn list_income(&self) -> Result<Vec<IncomeEntry>>;
    fn append_income(&mut self, entry: &IncomeEntry) -> Result<()>;
    fn update_income(&mut self, entry: &IncomeEntry) -> Result<()>;
    fn delete_income(&mut self, id: &str) -> Result<()>;

    fn list_expenses(&self) -> Result<Vec<ExpenseEntry>>;
    fn append_expense(&mut self, entry: &ExpenseEntry) -> Result<()>;
    fn update_expense(&mut self, entry: &ExpenseEntry) -> Result<()>;
    fn delete_expense(&mut self, id: &str) -> Result<()>;

    /// Append every entry whose id is not stored yet, all or nothing.
    /// Returns how many were added.
    fn import_income(&mut self, entries: &[IncomeEntry]) -> Result<usize>;
    fn import_expenses(&mut self, entries: &[ExpenseEntry]) -> Result<usize>;

    fn list_predictions(&self) -> Result<Vec<PredictionEntry>>;
    fn append_prediction(&mut self, entry: &PredictionEntry) -> Result<()>;
    fn delete_prediction(&mut self, id: &str) -> Result<()>;

    fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            income: self.list_income()?,
            expenses: self.list_expenses()?,
            predictions: self.list_predictions()?,
        })
    }
}
