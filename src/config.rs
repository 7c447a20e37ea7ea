use std::env;
use std::path::PathBuf;

/// Dataset the `/init` endpoint imports unless overridden.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Which [crate::store::TransactionStore] backs the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// SQLite database at [Config::database_path].
    Sqlite,
    /// Process memory; lost on restart.
    Memory,
}

impl StoreBackend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Some(Self::Sqlite),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub seed_url: String,
    pub store_backend: StoreBackend,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let store_backend = match env::var("SALESBOARD_STORE") {
            Ok(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown SALESBOARD_STORE, using sqlite");
                StoreBackend::Sqlite
            }),
            Err(_) => StoreBackend::Sqlite,
        };

        Self {
            host: env::var("SALESBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("SALESBOARD_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            database_path: env::var("SALESBOARD_DATABASE_URL")
                .map(|v| {
                    PathBuf::from(
                        v.strip_prefix("sqlite://")
                            .or_else(|| v.strip_prefix("sqlite:"))
                            .unwrap_or(&v),
                    )
                })
                .unwrap_or_else(|_| PathBuf::from("data/salesboard.db")),
            seed_url: env::var("SALESBOARD_SEED_URL").unwrap_or_else(|_| DEFAULT_SEED_URL.into()),
            store_backend,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
