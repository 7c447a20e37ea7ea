//! Month-level aggregations: sale statistics, the price-band histogram behind
//! the bar chart and the category counts behind the pie chart.

use std::collections::HashMap;

use chrono::Month;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::error::AppResult;
use crate::models::Transaction;
use crate::query_filter::TransactionFilter;
use crate::store::TransactionStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    pub total_sale_amount: f64,
    pub total_sold_items: u64,
    pub total_not_sold_items: u64,
}

impl SaleStatistics {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(Self::default(), |mut stats, transaction| {
                if transaction.sold {
                    stats.total_sale_amount += transaction.price;
                    stats.total_sold_items += 1;
                } else {
                    stats.total_not_sold_items += 1;
                }
                stats
            })
    }
}

/// A bar chart price band. `max` is inclusive; the last band is open-ended.
#[derive(Debug, Clone, Copy)]
pub struct PriceBand {
    pub label: &'static str,
    pub max: Option<f64>,
}

pub const PRICE_BANDS: [PriceBand; 10] = [
    PriceBand { label: "0-100", max: Some(100.0) },
    PriceBand { label: "101-200", max: Some(200.0) },
    PriceBand { label: "201-300", max: Some(300.0) },
    PriceBand { label: "301-400", max: Some(400.0) },
    PriceBand { label: "401-500", max: Some(500.0) },
    PriceBand { label: "501-600", max: Some(600.0) },
    PriceBand { label: "601-700", max: Some(700.0) },
    PriceBand { label: "701-800", max: Some(800.0) },
    PriceBand { label: "801-900", max: Some(900.0) },
    PriceBand { label: "901-above", max: None },
];

/// Index into [PRICE_BANDS] for `price`. Prices between two integer bounds
/// (100.5) fall into the higher band and negative prices into the first.
pub fn band_index(price: f64) -> usize {
    PRICE_BANDS
        .iter()
        .position(|band| band.max.map_or(true, |max| price <= max))
        .unwrap_or(PRICE_BANDS.len() - 1)
}

/// Count of transactions per price band, serialized as a label → count object
/// with every band present, in band order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceHistogram {
    counts: [u64; PRICE_BANDS.len()],
}

impl PriceHistogram {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut histogram = Self::default();
        for transaction in transactions {
            histogram.counts[band_index(transaction.price)] += 1;
        }
        histogram
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<u64> {
        PRICE_BANDS
            .iter()
            .position(|band| band.label == label)
            .map(|i| self.counts[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        PRICE_BANDS
            .iter()
            .zip(self.counts.iter())
            .map(|(band, count)| (band.label, *count))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Serialize for PriceHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PRICE_BANDS.len()))?;
        for (label, count) in self.iter() {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

/// Transactions per category, in the order each category was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    entries: Vec<(String, u64)>,
}

impl CategoryCounts {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<(String, u64)> = Vec::new();

        for transaction in transactions {
            match positions.get(transaction.category.as_str()) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    positions.insert(&transaction.category, entries.len());
                    entries.push((transaction.category.clone(), 1));
                }
            }
        }

        Self { entries }
    }

    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in self.iter() {
            map.serialize_entry(name, &count)?;
        }
        map.end()
    }
}

/// Every transaction sold in `month`, regardless of year.
pub fn month_transactions(
    store: &dyn TransactionStore,
    month: Month,
) -> AppResult<Vec<Transaction>> {
    let transactions = store.find(&TransactionFilter::for_month(month))?;
    debug!(month = month.name(), count = transactions.len(), "Loaded month");
    Ok(transactions)
}

pub fn statistics(store: &dyn TransactionStore, month: Month) -> AppResult<SaleStatistics> {
    let transactions = month_transactions(store, month)?;
    Ok(SaleStatistics::from_transactions(&transactions))
}

pub fn bar_chart(store: &dyn TransactionStore, month: Month) -> AppResult<PriceHistogram> {
    let transactions = month_transactions(store, month)?;
    let histogram = PriceHistogram::from_transactions(&transactions);
    debug!(month = month.name(), counted = histogram.total(), "Built price histogram");
    Ok(histogram)
}

pub fn pie_chart(store: &dyn TransactionStore, month: Month) -> AppResult<CategoryCounts> {
    let transactions = month_transactions(store, month)?;
    let counts = CategoryCounts::from_transactions(&transactions);
    debug!(month = month.name(), counted = counts.total(), "Built category counts");
    Ok(counts)
}
