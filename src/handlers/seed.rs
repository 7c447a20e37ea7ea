use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use tracing::info;

use crate::error::AppResult;
use crate::services::seed;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub count: usize,
}

/// Replace the whole collection with the configured seed dataset.
pub async fn init(State(state): State<AppState>) -> AppResult<Json<SeedResponse>> {
    info!(url = %state.config.seed_url, "Seeding database");

    let count = seed::seed_from_url(state.store.as_ref(), &state.http, &state.config.seed_url)
        .await
        .map_err(|e| e.context("Error initializing database"))?;

    Ok(Json(SeedResponse {
        message: "Database initialized with seed data".into(),
        count,
    }))
}
