//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::error::AppError;

#[derive(Serialize)]
pub struct Data<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct Message {
    pub message: String,
}

#[derive(Serialize)]
pub struct Success {
    pub success: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize)]
pub struct Token {
    pub token: String,
}

pub fn data<T: Serialize>(data: T) -> (StatusCode, Json<Data<T>>) {
    (StatusCode::OK, Json(Data { data }))
}

/// Wraps a list in the `data` envelope. An empty list is reported as 404 with `empty_message`.
pub fn data_many<T: Serialize>(
    rows: Vec<T>,
    empty_message: &str,
) -> Result<(StatusCode, Json<Data<Vec<T>>>), AppError> {
    if rows.is_empty() {
        return Err(AppError::NotFound(empty_message.to_string()));
    }
    Ok(data(rows))
}

pub fn message(message: impl Into<String>) -> (StatusCode, Json<Message>) {
    (
        StatusCode::OK,
        Json(Message {
            message: message.into(),
        }),
    )
}

pub fn success(success: impl Into<String>) -> (StatusCode, Json<Success>) {
    (
        StatusCode::OK,
        Json(Success {
            success: success.into(),
        }),
    )
}

pub fn token(token: String) -> (StatusCode, Json<Token>) {
    (StatusCode::OK, Json(Token { token }))
}
