//! The dashboard's one-shot payload: listing, statistics and both charts for
//! a single month/page/search combination.

use chrono::Month;
use serde::Serialize;
use tracing::debug;

use crate::error::AppResult;
use crate::services::analytics::{
    month_transactions, CategoryCounts, PriceHistogram, SaleStatistics,
};
use crate::services::listing::{list_transactions, PageRequest, TransactionPage};
use crate::store::TransactionStore;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    pub transactions: TransactionPage,
    pub statistics: SaleStatistics,
    pub pie_chart_data: CategoryCounts,
    pub bar_chart_data: PriceHistogram,
}

/// Any failing part fails the whole payload.
///
/// The three aggregations share one month-only read; the listing is a
/// separate windowed query.
pub fn combined_data(
    store: &dyn TransactionStore,
    month: Month,
    search: &str,
    page: PageRequest,
) -> AppResult<CombinedData> {
    let transactions = list_transactions(store, month, search, page)?;
    let month_set = month_transactions(store, month)?;

    debug!(
        month = month.name(),
        listed = transactions.transactions.len(),
        month_total = month_set.len(),
        "Built combined data"
    );

    Ok(CombinedData {
        transactions,
        statistics: SaleStatistics::from_transactions(&month_set),
        pie_chart_data: CategoryCounts::from_transactions(&month_set),
        bar_chart_data: PriceHistogram::from_transactions(&month_set),
    })
}
