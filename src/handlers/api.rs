use axum::extract::{FromRequestParts, Query, State};
use axum::response::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::query_filter::require_month;
use crate::services::analytics::{self, CategoryCounts, PriceHistogram, SaleStatistics};
use crate::services::combined::{self, CombinedData};
use crate::services::listing::{self, PageRequest, TransactionPage};
use crate::state::AppState;

/// `Query` whose parse failures come back as JSON validation errors.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub month: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    pub month: Option<String>,
}

pub async fn transactions(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListingParams>,
) -> AppResult<Json<TransactionPage>> {
    let month = require_month(params.month.as_deref())?;
    let page = PageRequest::new(params.page, params.per_page);
    let search = params.search.as_deref().unwrap_or("");

    let result = listing::list_transactions(state.store.as_ref(), month, search, page)
        .map_err(|e| e.context("Error fetching transactions"))?;
    Ok(Json(result))
}

pub async fn statistics(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MonthParams>,
) -> AppResult<Json<SaleStatistics>> {
    let month = require_month(params.month.as_deref())?;
    let stats = analytics::statistics(state.store.as_ref(), month)
        .map_err(|e| e.context("Error fetching statistics"))?;
    Ok(Json(stats))
}

pub async fn bar_chart(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MonthParams>,
) -> AppResult<Json<PriceHistogram>> {
    let month = require_month(params.month.as_deref())?;
    let histogram = analytics::bar_chart(state.store.as_ref(), month)
        .map_err(|e| e.context("Error fetching bar chart data"))?;
    Ok(Json(histogram))
}

pub async fn pie_chart(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MonthParams>,
) -> AppResult<Json<CategoryCounts>> {
    let month = require_month(params.month.as_deref())?;
    let counts = analytics::pie_chart(state.store.as_ref(), month)
        .map_err(|e| e.context("Error fetching pie chart data"))?;
    Ok(Json(counts))
}

pub async fn combined_data(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListingParams>,
) -> AppResult<Json<CombinedData>> {
    let month = require_month(params.month.as_deref())?;
    let page = PageRequest::new(params.page, params.per_page);
    let search = params.search.as_deref().unwrap_or("");

    let result = combined::combined_data(state.store.as_ref(), month, search, page)
        .map_err(|e| e.context("Error fetching combined data"))?;
    Ok(Json(result))
}
