use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Config, StoreBackend};
use crate::db::{create_pool, migrations};
use crate::handlers;
use crate::services::seed;
use crate::state::AppState;
use crate::store::{MemoryStore, SqliteStore, TransactionStore};

/// Open the store selected by `config`, running migrations for SQLite.
pub fn open_store(config: &Config) -> Result<Arc<dyn TransactionStore>, Box<dyn std::error::Error>> {
    match config.store_backend {
        StoreBackend::Sqlite => {
            let db = create_pool(&config.database_path)?;
            {
                let conn = db.get()?;
                migrations::run_migrations(&conn)?;
            }
            tracing::info!(path = %config.database_path.display(), "Using SQLite store");
            Ok(Arc::new(SqliteStore::new(db)))
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Attach the middleware stack to the routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::routes())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the application state and Axum router from a [`Config`].
pub fn build_app(config: Config) -> Result<(AppState, Router), Box<dyn std::error::Error>> {
    let store = open_store(&config)?;

    let state = AppState {
        store,
        config: Arc::new(config),
        http: seed::create_client()?,
    };

    Ok((state.clone(), router(state)))
}

/// Bind the router to `host:port` and spawn the server as a tokio task.
///
/// Returns the actual port the server bound to (useful when `port` is 0 for
/// OS-assigned ports) and a [`JoinHandle`] for the server task.
pub async fn serve(
    app: Router,
    host: &str,
    port: u16,
) -> Result<(u16, JoinHandle<std::io::Result<()>>), Box<dyn std::error::Error>> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();

    let handle = tokio::spawn(async move { axum::serve(listener, app).await });

    Ok((actual_port, handle))
}
