//! Liveness, readiness and build info. Failures go through `AppError` like every other route.

use crate::error::AppError;
use crate::response::{data, message};
use crate::state::AppState;
use crate::store;
use axum::{extract::State, response::IntoResponse, routing::get, Router};
use serde::Serialize;

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn health() -> impl IntoResponse {
    message("ok")
}

async fn ready(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    store::ping(&state.pool).await?;
    Ok(message("ready"))
}

async fn version() -> impl IntoResponse {
    data(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
