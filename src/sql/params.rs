//! Values collected by the builder and bound in order onto a sqlx query.

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Text(String),
    Int(i64),
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::Text(s)
    }
}

impl From<i64> for BindValue {
    fn from(n: i64) -> Self {
        BindValue::Int(n)
    }
}

/// Bind every value in `params` onto `query`, in order.
pub fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[BindValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for p in params {
        query = match p {
            BindValue::Text(s) => query.bind(s.clone()),
            BindValue::Int(n) => query.bind(*n),
        };
    }
    query
}
