//! One-shot import of the fixed product dataset.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::Transaction;
use crate::store::TransactionStore;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Create an HTTP client with appropriate timeout
pub fn create_client() -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Download and parse the dataset at `url`. Any record that does not parse
/// fails the whole fetch.
pub async fn fetch_dataset(client: &Client, url: &str) -> AppResult<Vec<Transaction>> {
    debug!(url = %url, "Fetching seed dataset");

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Upstream(format!(
            "Seed dataset request returned {}",
            status
        )));
    }

    let transactions: Vec<Transaction> = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Invalid seed dataset: {}", e)))?;

    debug!(count = transactions.len(), "Parsed seed dataset");
    Ok(transactions)
}

/// Replace the store's contents with the dataset at `url`.
///
/// Nothing is deleted unless the download and parse succeed.
pub async fn seed_from_url(
    store: &dyn TransactionStore,
    client: &Client,
    url: &str,
) -> AppResult<usize> {
    let transactions = fetch_dataset(client, url).await?;
    let inserted = store.replace_all(&transactions)?;
    info!(url = %url, inserted, "Database initialized with seed data");
    Ok(inserted)
}
