//! Storage behind the dashboard endpoints.
//!
//! Services only see the [TransactionStore] trait, so the SQLite-backed store
//! used in production can be swapped for the in-memory one in tests.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::AppResult;
use crate::models::Transaction;
use crate::query_filter::TransactionFilter;

/// Read access by month/search and wholesale replacement of the collection.
pub trait TransactionStore: Send + Sync {
    /// Transactions matching `filter` in insertion order, windowed by the
    /// filter's limit and offset.
    fn find(&self, filter: &TransactionFilter) -> AppResult<Vec<Transaction>>;

    /// The windowed page of [TransactionStore::find] together with the number
    /// of matches before windowing, both taken from the same read.
    fn find_with_count(&self, filter: &TransactionFilter) -> AppResult<(Vec<Transaction>, i64)>;

    /// Drop every stored transaction and store `transactions` instead.
    /// Returns the number inserted.
    fn replace_all(&self, transactions: &[Transaction]) -> AppResult<usize>;
}
