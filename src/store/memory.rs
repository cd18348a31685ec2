use crate::error::{Error, Result};
use crate::models::{ExpenseEntry, IncomeEntry, PredictionEntry};

use super::RecordStore;

/// Vector-backed store. Nothing survives the process.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    income: Vec<IncomeEntry>,
    expenses: Vec<ExpenseEntry>,
    predictions: Vec<PredictionEntry>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

fn replace<T: Clone>(
    items: &mut [T],
    entry: &T,
    id_of: impl Fn(&T) -> &str,
    kind: &'static str,
) -> Result<()> {
    let id = id_of(entry);
    let slot = items
        .iter_mut()
        .find(|item| id_of(&**item) == id)
        .ok_or_else(|| Error::NotFound {
            kind,
            id: id.to_string(),
        })?;
    *slot = entry.clone();
    Ok(())
}

/// Push entries with unseen ids. Nothing here can fail part way.
fn append_new<T: Clone>(items: &mut Vec<T>, entries: &[T], id_of: impl Fn(&T) -> &str) -> usize {
    let mut added = 0;
    for entry in entries {
        if !items.iter().any(|item| id_of(item) == id_of(entry)) {
            items.push(entry.clone());
            added += 1;
        }
    }
    added
}

fn remove<T>(
    items: &mut Vec<T>,
    id: &str,
    id_of: impl Fn(&T) -> &str,
    kind: &'static str,
) -> Result<()> {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    if items.len() == before {
        return Err(Error::NotFound {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}

impl RecordStore for MemoryStore {
    fn list_income(&self) -> Result<Vec<IncomeEntry>> {
        Ok(self.income.clone())
    }

    fn append_income(&mut self, entry: &IncomeEntry) -> Result<()> {
        self.income.push(entry.clone());
        Ok(())
    }

    fn update_income(&mut self, entry: &IncomeEntry) -> Result<()> {
        replace(&mut self.income, entry, |i| i.id.as_str(), "income")
    }

    fn delete_income(&mut self, id: &str) -> Result<()> {
        remove(&mut self.income, id, |i| i.id.as_str(), "income")
    }

    fn list_expenses(&self) -> Result<Vec<ExpenseEntry>> {
        Ok(self.expenses.clone())
    }

    fn append_expense(&mut self, entry: &ExpenseEntry) -> Result<()> {
        self.expenses.push(entry.clone());
        Ok(())
    }

    fn update_expense(&mut self, entry: &ExpenseEntry) -> Result<()> {
        replace(&mut self.expenses, entry, |e| e.id.as_str(), "expense")
    }

    fn delete_expense(&mut self, id: &str) -> Result<()> {
        remove(&mut self.expenses, id, |e| e.id.as_str(), "expense")
    }

    fn import_income(&mut self, entries: &[IncomeEntry]) -> Result<usize> {
        Ok(append_new(&mut self.income, entries, |i| i.id.as_str()))
    }

    fn import_expenses(&mut self, entries: &[ExpenseEntry]) -> Result<usize> {
        Ok(append_new(&mut self.expenses, entries, |e| e.id.as_str()))
    }

    fn list_predictions(&self) -> Result<Vec<PredictionEntry>> {
        Ok(self.predictions.clone())
    }

    fn append_prediction(&mut self, entry: &PredictionEntry) -> Result<()> {
        self.predictions.push(entry.clone());
        Ok(())
    }

    fn delete_prediction(&mut self, id: &str) -> Result<()> {
        remove(&mut self.predictions, id, |p| p.id.as_str(), "prediction")
    }
}
