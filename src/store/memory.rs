use std::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::Transaction;
use crate::query_filter::TransactionFilter;

use super::TransactionStore;

/// [TransactionStore] holding everything in a vector.
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, Vec<Transaction>>> {
        self.transactions
            .read()
            .map_err(|_| AppError::Internal("Transaction store lock poisoned".into()))
    }
}

impl TransactionStore for MemoryStore {
    fn find(&self, filter: &TransactionFilter) -> AppResult<Vec<Transaction>> {
        let matching: Vec<Transaction> = self
            .read()?
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        Ok(filter.apply_window(matching))
    }

    fn find_with_count(&self, filter: &TransactionFilter) -> AppResult<(Vec<Transaction>, i64)> {
        let matching: Vec<Transaction> = self
            .read()?
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        let total = matching.len() as i64;
        Ok((filter.apply_window(matching), total))
    }

    fn replace_all(&self, transactions: &[Transaction]) -> AppResult<usize> {
        let mut guard = self
            .transactions
            .write()
            .map_err(|_| AppError::Internal("Transaction store lock poisoned".into()))?;
        *guard = transactions.to_vec();
        Ok(guard.len())
    }
}
