//! HTTP handlers: parse path and body, call the service, wrap the result in an envelope.

pub mod accounts;
pub mod login;
pub mod providers;
pub mod sneakers;

use crate::error::AppError;

/// Parse the `:id` path segment.
pub(crate) fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("incorrect ID".into()))
}
