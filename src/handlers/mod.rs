pub mod api;
pub mod seed;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Seeding
        .route("/init", get(seed::init))
        // Dashboard data (JSON)
        .route("/transactions", get(api::transactions))
        .route("/statistics", get(api::statistics))
        .route("/bar-chart", get(api::bar_chart))
        .route("/pie-chart", get(api::pie_chart))
        .route("/combined-data", get(api::combined_data))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
