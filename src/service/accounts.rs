//! Users and admins: same operations over two tables.

use crate::auth::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::{AccountPatch, Admin, NewAccount, User};
use crate::sql::{bind_all, update, SetFields};
use regex::Regex;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};
use std::marker::PhantomData;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+$";

/// A table of email/password accounts.
pub trait AccountTable: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Unpin + 'static {
    const TABLE: &'static str;
    /// Select list, in struct field order.
    const COLUMNS: &'static str;
    /// Singular label used in messages, e.g. "User".
    const LABEL: &'static str;
    /// Plural label used in messages, e.g. "Users".
    const PLURAL: &'static str;

    fn id(&self) -> i64;
    fn password_hash(&self) -> &str;
}

impl AccountTable for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str = "id, email, password, created_at";
    const LABEL: &'static str = "User";
    const PLURAL: &'static str = "Users";

    fn id(&self) -> i64 {
        self.id
    }

    fn password_hash(&self) -> &str {
        &self.password
    }
}

impl AccountTable for Admin {
    const TABLE: &'static str = "admins";
    const COLUMNS: &'static str = "id, email, password";
    const LABEL: &'static str = "Admin";
    const PLURAL: &'static str = "Admins";

    fn id(&self) -> i64 {
        self.id
    }

    fn password_hash(&self) -> &str {
        &self.password
    }
}

pub struct AccountService<T>(PhantomData<T>);

impl<T: AccountTable> AccountService<T> {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<T>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", T::COLUMNS, T::TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<T, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", T::COLUMNS, T::TABLE);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no {} found with id {}", T::LABEL.to_lowercase(), id)))
    }

    /// Insert a new account and return its id. Duplicate emails fail with `Conflict`.
    pub async fn create(pool: &SqlitePool, account: NewAccount) -> Result<i64, AppError> {
        validate_email(&account.email)?;
        if account.password.is_empty() {
            return Err(AppError::BadRequest("password is required".into()));
        }
        let hash = hash_password(&account.password)?;
        let sql = format!("INSERT INTO {} (email, password) VALUES (?, ?)", T::TABLE);
        tracing::debug!(sql = %sql, "query");
        let result = sqlx::query(&sql)
            .bind(&account.email)
            .bind(hash)
            .execute(pool)
            .await
            .map_err(Self::email_taken)?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite the non-empty fields of `patch`. An empty patch is rejected and changes nothing.
    pub async fn update(pool: &SqlitePool, id: i64, patch: AccountPatch) -> Result<(), AppError> {
        let email = patch.email.filter(|e| !e.is_empty());
        if let Some(ref e) = email {
            validate_email(e)?;
        }
        let password = match patch.password.filter(|p| !p.is_empty()) {
            Some(p) => Some(hash_password(&p)?),
            None => None,
        };
        let set = SetFields::new().text("email", email).text("password", password);
        let q = update(T::TABLE, "id", id, set)
            .ok_or_else(|| AppError::BadRequest("no fields to update".into()))?;
        tracing::debug!(sql = %q.sql, "query");
        let result = bind_all(sqlx::query(&q.sql), &q.params)
            .execute(pool)
            .await
            .map_err(Self::email_taken)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "no {} found with id {}",
                T::PLURAL.to_lowercase(),
                id
            )));
        }
        Ok(())
    }

    /// The only unique column on an account table is `email`.
    fn email_taken(e: sqlx::Error) -> AppError {
        match AppError::from(e) {
            AppError::Conflict(_) => {
                AppError::Conflict(format!("{} with this email already exists", T::LABEL))
            }
            other => other,
        }
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "no {} found with id {}",
                T::PLURAL.to_lowercase(),
                id
            )));
        }
        Ok(())
    }

    /// Id of the account with exactly this email whose password verifies, if any.
    pub async fn login(pool: &SqlitePool, email: &str, password: &str) -> Result<Option<i64>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE email = ?", T::COLUMNS, T::TABLE);
        tracing::debug!(sql = %sql, "query");
        let account = sqlx::query_as::<_, T>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(account
            .filter(|a| verify_password(password, a.password_hash()))
            .map(|a| a.id()))
    }
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let re = Regex::new(EMAIL_PATTERN)
        .map_err(|e| AppError::Internal(format!("email pattern: {}", e)))?;
    if !re.is_match(email) {
        return Err(AppError::BadRequest("email must be a valid address".into()));
    }
    Ok(())
}
