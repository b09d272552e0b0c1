use crate::error::AppError;
use crate::models::{NewProvider, Provider, ProviderPatch};
use crate::sql::{bind_all, update, SetFields};
use sqlx::SqlitePool;

pub struct ProviderService;

impl ProviderService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Provider>, AppError> {
        let rows = sqlx::query_as::<_, Provider>(
            "SELECT id, provider_name FROM product_providers ORDER BY id",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Provider, AppError> {
        sqlx::query_as::<_, Provider>("SELECT id, provider_name FROM product_providers WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no provider found with id {}", id)))
    }

    pub async fn create(pool: &SqlitePool, provider: NewProvider) -> Result<i64, AppError> {
        if provider.provider_name.is_empty() {
            return Err(AppError::BadRequest("providerName is required".into()));
        }
        let result = sqlx::query("INSERT INTO product_providers (provider_name) VALUES (?)")
            .bind(provider.provider_name)
            .execute(pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update(pool: &SqlitePool, id: i64, patch: ProviderPatch) -> Result<(), AppError> {
        let set = SetFields::new().text("provider_name", patch.provider_name);
        let q = update("product_providers", "id", id, set)
            .ok_or_else(|| AppError::BadRequest("no fields to update".into()))?;
        tracing::debug!(sql = %q.sql, "query");
        let result = bind_all(sqlx::query(&q.sql), &q.params).execute(pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("no providers found with id {}", id)));
        }
        Ok(())
    }

    /// Delete a provider; availability and scrapper rows that reference it cascade.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM product_providers WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("no providers found with id {}", id)));
        }
        Ok(())
    }
}
