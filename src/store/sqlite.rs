use rusqlite::Connection;

use crate::db::queries::transactions;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::Transaction;
use crate::query_filter::TransactionFilter;

use super::TransactionStore;

/// [TransactionStore] over the `transactions` table.
///
/// The month filter and window run in SQL. A search pattern is applied to the
/// month's rows in Rust, since SQLite has no regex operator.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn searched(conn: &Connection, filter: &TransactionFilter) -> AppResult<Vec<Transaction>> {
        let month_rows = transactions::list_for_month(conn, filter.month_number(), None, None)?;
        Ok(month_rows
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect())
    }
}

impl TransactionStore for SqliteStore {
    fn find(&self, filter: &TransactionFilter) -> AppResult<Vec<Transaction>> {
        let conn = self.pool.get()?;
        if filter.search.is_some() {
            let matching = Self::searched(&conn, filter)?;
            return Ok(filter.apply_window(matching));
        }

        Ok(transactions::list_for_month(
            &conn,
            filter.month_number(),
            filter.limit,
            filter.offset,
        )?)
    }

    fn find_with_count(&self, filter: &TransactionFilter) -> AppResult<(Vec<Transaction>, i64)> {
        let mut conn = self.pool.get()?;

        if filter.search.is_some() {
            let matching = Self::searched(&conn, filter)?;
            let total = matching.len() as i64;
            return Ok((filter.apply_window(matching), total));
        }

        // Page and count read one snapshot, so a concurrent re-seed can't split them
        let tx = conn.transaction()?;
        let page =
            transactions::list_for_month(&tx, filter.month_number(), filter.limit, filter.offset)?;
        let total = transactions::count_for_month(&tx, filter.month_number())?;
        tx.commit()?;

        Ok((page, total))
    }

    fn replace_all(&self, records: &[Transaction]) -> AppResult<usize> {
        let mut conn = self.pool.get()?;
        Ok(transactions::replace_all(&mut conn, records)?)
    }
}
