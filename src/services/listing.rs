use chrono::Month;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppResult;
use crate::models::Transaction;
use crate::query_filter::TransactionFilter;
use crate::store::TransactionStore;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;

/// A 1-indexed page request. Values below 1 are clamped to 1; `per_page` has
/// no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// One page of the month's transactions matching `search`, with the total
/// size of the filtered set.
pub fn list_transactions(
    store: &dyn TransactionStore,
    month: Month,
    search: &str,
    page: PageRequest,
) -> AppResult<TransactionPage> {
    let filter = TransactionFilter::for_month(month)
        .with_search(search)
        .with_window(page.per_page, page.offset());

    let (transactions, total) = store.find_with_count(&filter)?;

    debug!(
        month = month.name(),
        search = %search,
        page = page.page,
        per_page = page.per_page,
        total,
        "Listed transactions page"
    );

    Ok(TransactionPage {
        transactions,
        total,
        page: page.page,
        per_page: page.per_page,
    })
}
