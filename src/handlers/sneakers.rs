use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::handlers::parse_id;
use crate::models::{NewSneaker, SneakerPatch};
use crate::response;
use crate::service::SneakerService;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

const NO_SNEAKERS: &str = "No Sneakers Found";

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = SneakerService::list(&state.pool).await?;
    response::data_many(rows, NO_SNEAKERS)
}

pub async fn list_information(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = SneakerService::list_with_information(&state.pool).await?;
    response::data_many(rows, NO_SNEAKERS)
}

pub async fn read_information(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = SneakerService::get_information(&state.pool, id).await?;
    Ok(response::data(row))
}

pub async fn availability(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = SneakerService::availability(&state.pool).await?;
    response::data_many(rows, NO_SNEAKERS)
}

pub async fn scrappers(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let rows = SneakerService::scrappers(&state.pool, id).await?;
    response::data_many(rows, "No Scrappers Found")
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewSneaker>,
) -> Result<impl IntoResponse, AppError> {
    let id = SneakerService::create(&state.pool, body).await?;
    tracing::info!(id, "sneaker created");
    Ok(response::success("Sneaker added to the database"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<SneakerPatch>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    SneakerService::update(&state.pool, id, body).await?;
    Ok(response::message("Sneaker Updated!"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    SneakerService::delete(&state.pool, id).await?;
    Ok(response::message("Sneaker Deleted!"))
}
