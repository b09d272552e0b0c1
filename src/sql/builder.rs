//! Builds the partial UPDATE used by every patch endpoint.

use super::params::BindValue;

/// Quote identifier for SQLite (safe: only from compile-time column lists).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

/// Column assignments for a PATCH body. Only fields that carry a value are kept.
#[derive(Debug, Default)]
pub struct SetFields {
    fields: Vec<(&'static str, BindValue)>,
}

impl SetFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `value` unless it is absent or an empty string.
    pub fn text(mut self, column: &'static str, value: Option<String>) -> Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.fields.push((column, BindValue::Text(v)));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// `UPDATE table SET a = ?, b = ? WHERE pk = ?`. Returns None when there is nothing to set.
pub fn update(table: &str, pk: &str, id: i64, set: SetFields) -> Option<QueryBuf> {
    if set.is_empty() {
        return None;
    }
    let mut params = Vec::with_capacity(set.len() + 1);
    let mut sets = Vec::with_capacity(set.len());
    for (column, value) in set.fields {
        sets.push(format!("{} = ?", quoted(column)));
        params.push(value);
    }
    params.push(BindValue::Int(id));
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(table),
        sets.join(", "),
        quoted(pk)
    );
    Some(QueryBuf { sql, params })
}
