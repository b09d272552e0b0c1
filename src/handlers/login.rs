use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{Credentials, User};
use crate::response;
use crate::service::AccountService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

/// POST /login/: exchange email and password for a signed token carrying the user id.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(creds): JsonBody<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = AccountService::<User>::login(&state.pool, &creds.email, &creds.password)
        .await?
        .ok_or_else(|| {
            tracing::warn!("login rejected");
            AppError::Unauthorized
        })?;
    let token = state.tokens.issue(user_id)?;
    tracing::info!(user_id, "login succeeded");
    Ok(response::token(token))
}
