use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::handlers::parse_id;
use crate::models::{NewProvider, ProviderPatch};
use crate::response;
use crate::service::ProviderService;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = ProviderService::list(&state.pool).await?;
    response::data_many(rows, "No Providers Found")
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = ProviderService::get_by_id(&state.pool, id).await?;
    Ok(response::data(row))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewProvider>,
) -> Result<impl IntoResponse, AppError> {
    let id = ProviderService::create(&state.pool, body).await?;
    tracing::info!(id, "provider created");
    Ok(response::success("Provider added to the database"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<ProviderPatch>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    ProviderService::update(&state.pool, id, body).await?;
    Ok(response::message("Provider Updated!"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    ProviderService::delete(&state.pool, id).await?;
    Ok(response::message("Provider Deleted!"))
}
