//! Shared test utilities for integration tests.
//!
//! `TestClient` drives the full router with `oneshot` requests against either
//! the in-memory store or an in-memory SQLite pool.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use salesboard::config::{Config, StoreBackend, DEFAULT_SEED_URL};
use salesboard::db::{create_in_memory_pool, migrations};
use salesboard::models::Transaction;
use salesboard::server;
use salesboard::state::AppState;
use salesboard::store::{MemoryStore, SqliteStore, TransactionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Client over a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), StoreBackend::Memory)
    }

    /// Client over a fresh in-memory SQLite database.
    pub fn with_sqlite() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            migrations::run_migrations(&conn).expect("Failed to run migrations");
        }
        Self::with_store(Arc::new(SqliteStore::new(pool)), StoreBackend::Sqlite)
    }

    /// Client over an in-memory SQLite database without the schema, so every
    /// store read fails.
    pub fn with_broken_sqlite() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        Self::with_store(Arc::new(SqliteStore::new(pool)), StoreBackend::Sqlite)
    }

    fn with_store(store: Arc<dyn TransactionStore>, store_backend: StoreBackend) -> Self {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 5000,
            database_path: PathBuf::from(":memory:"),
            seed_url: DEFAULT_SEED_URL.into(),
            store_backend,
        };

        let state = AppState {
            store,
            config: Arc::new(config),
            // Local test upstreams must not be routed through an environment proxy
            http: reqwest::Client::builder()
                .no_proxy()
                .build()
                .expect("Failed to create HTTP client"),
        };

        Self { state }
    }

    /// Point `/init` at a different dataset URL.
    pub fn with_seed_url(mut self, url: &str) -> Self {
        let mut config = (*self.state.config).clone();
        config.seed_url = url.to_string();
        self.state.config = Arc::new(config);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        server::router(self.state.clone())
    }

    /// Replace the store's contents directly, bypassing `/init`.
    pub fn seed(&self, transactions: &[Transaction]) {
        self.state
            .store
            .replace_all(transactions)
            .expect("Failed to seed store");
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).ok();
        (status, parsed)
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a transaction sold (or not) at `date` (RFC 3339).
pub fn transaction(
    id: i64,
    title: &str,
    price: f64,
    category: &str,
    sold: bool,
    date: &str,
) -> Transaction {
    Transaction {
        id,
        title: title.into(),
        price,
        description: format!("Description of {}", title),
        category: category.into(),
        image: format!("https://example.com/{}.jpg", id),
        sold,
        date_of_sale: DateTime::parse_from_rfc3339(date)
            .expect("Invalid test date")
            .with_timezone(&Utc),
    }
}

/// A small catalogue spread over March, April and two different years.
pub fn sample_dataset() -> Vec<Transaction> {
    vec![
        transaction(1, "Fjallraven Backpack", 109.95, "men's clothing", true, "2021-03-27T20:29:54+05:30"),
        transaction(2, "Mens Casual T-Shirt", 22.3, "men's clothing", false, "2021-03-03T10:00:00Z"),
        transaction(3, "Gold Chain Bracelet", 695.0, "jewelery", true, "2022-03-15T12:00:00Z"),
        transaction(4, "Solid Gold Petite Micropave", 168.0, "jewelery", false, "2021-03-10T09:30:00Z"),
        transaction(5, "WD 2TB External Hard Drive", 64.0, "electronics", true, "2021-03-21T18:00:00Z"),
        transaction(6, "Samsung 49-Inch Monitor", 999.99, "electronics", false, "2021-03-08T07:45:00Z"),
        transaction(7, "Rain Jacket Women Windbreaker", 39.99, "women's clothing", true, "2021-04-02T11:00:00Z"),
        transaction(8, "SanDisk SSD PLUS 1TB", 109.0, "electronics", true, "2021-04-18T16:20:00Z"),
    ]
}
