//! Translates request parameters (month + free-text search) into the filter
//! every store query runs with.

use chrono::Month;
use regex::{Regex, RegexBuilder};

use crate::date_utils::{month_number, parse_month};
use crate::error::{AppError, AppResult};
use crate::models::Transaction;

/// Case-insensitive pattern matched against title and description.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    regex: Regex,
}

impl SearchPattern {
    /// Compile `search` as a case-insensitive regex. Patterns that fail to
    /// compile are matched literally. Returns `None` for an empty search,
    /// which matches everything.
    pub fn new(search: &str) -> Option<Self> {
        if search.is_empty() {
            return None;
        }

        let regex = RegexBuilder::new(search)
            .case_insensitive(true)
            .build()
            .or_else(|_| {
                RegexBuilder::new(&regex::escape(search))
                    .case_insensitive(true)
                    .build()
            })
            .ok()?;

        Some(Self { regex })
    }

    pub fn is_match(&self, transaction: &Transaction) -> bool {
        self.regex.is_match(&transaction.title) || self.regex.is_match(&transaction.description)
    }
}

#[derive(Debug, Clone)]
pub struct TransactionFilter {
    pub month: Month,
    pub search: Option<SearchPattern>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl TransactionFilter {
    /// Month-only filter, as used by the statistics and chart aggregations.
    pub fn for_month(month: Month) -> Self {
        Self {
            month,
            search: None,
            limit: None,
            offset: None,
        }
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = SearchPattern::new(search);
        self
    }

    pub fn with_window(mut self, limit: i64, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    pub fn month_number(&self) -> u32 {
        month_number(self.month)
    }

    /// Month and search predicate; ignores the limit/offset window.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        transaction.sale_month() == self.month_number()
            && self
                .search
                .as_ref()
                .map_or(true, |pattern| pattern.is_match(transaction))
    }

    /// Apply the limit/offset window to an already filtered, ordered list.
    pub fn apply_window(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        let skip = self.offset.unwrap_or(0).max(0) as usize;
        let take = self.limit.map_or(usize::MAX, |l| l.max(0) as usize);
        transactions.into_iter().skip(skip).take(take).collect()
    }
}

/// Resolve the `month` query parameter, rejecting missing or unknown months.
pub fn require_month(month: Option<&str>) -> AppResult<Month> {
    let raw = month.ok_or_else(|| AppError::Validation("Missing month".into()))?;
    parse_month(raw).ok_or_else(|| AppError::Validation(format!("Invalid month: {}", raw)))
}
