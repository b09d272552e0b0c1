//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ErrorBody;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("internal: {0}")]
    Internal(String),
    #[error("database: {0}")]
    Db(sqlx::Error),
    #[error("token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("password hash: {0}")]
    PasswordHash(argon2::password_hash::Error),
}

/// Client message for a unique violation with no more specific mapping.
pub const DUPLICATE_RECORD: &str = "a record with this value already exists";

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("no rows found".into()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                tracing::debug!(cause = %db.message(), "unique violation");
                AppError::Conflict(DUPLICATE_RECORD.into())
            }
            other => AppError::Db(other),
        }
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(e)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Db(_)
            | AppError::Token(_)
            | AppError::PasswordHash(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` envelope. Internal failures never leak their cause.
    fn client_message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Unavailable(msg) => msg.clone(),
            AppError::Unauthorized => "incorrect email or password".into(),
            AppError::Db(_)
            | AppError::Token(_)
            | AppError::PasswordHash(_)
            | AppError::Config(_)
            | AppError::Internal(_) => "internal error".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_is_404_with_message() {
        let (status, body) = body_of(AppError::NotFound("user 7 not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "user 7 not found");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn database_failure_hides_cause() {
        let (status, body) = body_of(AppError::Db(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal error");
    }

    #[tokio::test]
    async fn config_and_internal_failures_are_500_without_cause() {
        let bad_url = ConfigError::Invalid {
            key: "DATABASE_URL",
            value: "nope://".into(),
        };
        for err in [AppError::from(bad_url), AppError::Internal("regex".into())] {
            let (status, body) = body_of(err).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["error"], "internal error");
        }
    }

    #[tokio::test]
    async fn unavailable_is_503_with_message() {
        let (status, body) = body_of(AppError::Unavailable("database unreachable".into())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "database unreachable");
    }

    #[tokio::test]
    async fn unauthorized_is_401() {
        let (status, body) = body_of(AppError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "incorrect email or password");
    }
}
