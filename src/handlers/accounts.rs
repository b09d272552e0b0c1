//! `/user` and `/admin` handlers, generic over the account table.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::handlers::parse_id;
use crate::models::{AccountPatch, NewAccount};
use crate::response;
use crate::service::{AccountService, AccountTable};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

pub async fn list<T: AccountTable>(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = AccountService::<T>::list(&state.pool).await?;
    response::data_many(rows, &format!("No {} Found", T::PLURAL))
}

pub async fn read<T: AccountTable>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = AccountService::<T>::get_by_id(&state.pool, id).await?;
    Ok(response::data(row))
}

pub async fn create<T: AccountTable>(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewAccount>,
) -> Result<impl IntoResponse, AppError> {
    let id = AccountService::<T>::create(&state.pool, body).await?;
    tracing::info!(table = T::TABLE, id, "account created");
    Ok(response::success(format!("{} added to the database", T::LABEL)))
}

pub async fn update<T: AccountTable>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<AccountPatch>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    AccountService::<T>::update(&state.pool, id, body).await?;
    Ok(response::message(format!("{} Updated!", T::LABEL)))
}

pub async fn delete<T: AccountTable>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    AccountService::<T>::delete(&state.pool, id).await?;
    tracing::info!(table = T::TABLE, id, "account deleted");
    Ok(response::message(format!("{} Deleted!", T::LABEL)))
}
