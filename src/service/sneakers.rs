//! Sneaker catalog queries, including the two aggregated join views.

use crate::error::AppError;
use crate::models::{
    AvailabilityRow, NewSneaker, ScrapperRow, Sneaker, SneakerAvailability, SneakerInformation,
    SneakerInformationRow, SneakerPatch, SneakerScrappers,
};
use crate::service::aggregate::group_by_parent;
use crate::sql::{bind_all, update, SetFields};
use sqlx::SqlitePool;

const INFORMATION_SELECT: &str = r#"
    SELECT s.id, s.name, s.model, s.brand,
           si.main_info, si.main_image_url, si.additional_info
    FROM sneakers s
    JOIN sneakers_information si ON s.id = si.sneaker_id
"#;

pub struct SneakerService;

impl SneakerService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Sneaker>, AppError> {
        let rows = sqlx::query_as::<_, Sneaker>(
            "SELECT id, name, model, brand FROM sneakers ORDER BY id",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Every sneaker that has an information record, joined with it.
    pub async fn list_with_information(pool: &SqlitePool) -> Result<Vec<SneakerInformation>, AppError> {
        let sql = format!("{} ORDER BY s.id", INFORMATION_SELECT);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, SneakerInformationRow>(&sql)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(SneakerInformation::from).collect())
    }

    pub async fn get_information(pool: &SqlitePool, id: i64) -> Result<SneakerInformation, AppError> {
        let sql = format!("{} WHERE s.id = ?", INFORMATION_SELECT);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, SneakerInformationRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(SneakerInformation::from)
            .ok_or_else(|| AppError::NotFound(format!("no sneaker information found with id {}", id)))
    }

    /// Sneakers with all their provider availability rows, one entry per sneaker.
    pub async fn availability(pool: &SqlitePool) -> Result<Vec<SneakerAvailability>, AppError> {
        let rows = sqlx::query_as::<_, AvailabilityRow>(
            r#"
            SELECT s.id, s.name, s.model, s.brand,
                   pi.id AS availability_id, pi.provider_id, pi.price, pi.available
            FROM sneakers s
            JOIN provider_information pi ON s.id = pi.product_id
            ORDER BY s.id, pi.id
            "#,
        )
        .fetch_all(pool)
        .await?;
        Ok(
            group_by_parent(rows.into_iter().map(AvailabilityRow::split), |s| s.id)
                .into_iter()
                .map(|(sneaker, availability)| SneakerAvailability {
                    sneaker,
                    availability,
                })
                .collect(),
        )
    }

    /// Scraper search terms of one sneaker. Empty when the sneaker has none (or does not exist).
    pub async fn scrappers(pool: &SqlitePool, id: i64) -> Result<Vec<SneakerScrappers>, AppError> {
        let rows = sqlx::query_as::<_, ScrapperRow>(
            r#"
            SELECT s.id, s.name, s.model, s.brand,
                   avs.id AS scrapper_id, avs.provider_id, avs.search_for
            FROM sneakers s
            JOIN availability_scrappers avs ON s.id = avs.product_id
            WHERE s.id = ?
            ORDER BY avs.id
            "#,
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(
            group_by_parent(rows.into_iter().map(ScrapperRow::split), |s| s.id)
                .into_iter()
                .map(|(sneaker, scrapper)| SneakerScrappers { sneaker, scrapper })
                .collect(),
        )
    }

    /// Insert a sneaker and, if given, its information record, atomically. Returns the new id.
    pub async fn create(pool: &SqlitePool, sneaker: NewSneaker) -> Result<i64, AppError> {
        for (field, value) in [
            ("name", &sneaker.name),
            ("model", &sneaker.model),
            ("brand", &sneaker.brand),
        ] {
            if value.is_empty() {
                return Err(AppError::BadRequest(format!("{} is required", field)));
            }
        }
        let mut tx = pool.begin().await?;
        let id = sqlx::query("INSERT INTO sneakers (name, model, brand) VALUES (?, ?, ?)")
            .bind(&sneaker.name)
            .bind(&sneaker.model)
            .bind(&sneaker.brand)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        if let Some(info) = sneaker.information {
            sqlx::query(
                "INSERT INTO sneakers_information (sneaker_id, main_info, main_image_url, additional_info) VALUES (?, ?, ?, ?)",
            )
            .bind(id)
            .bind(info.main_info)
            .bind(info.main_image_url)
            .bind(info.additional_info)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(id)
    }

    pub async fn update(pool: &SqlitePool, id: i64, patch: SneakerPatch) -> Result<(), AppError> {
        let set = SetFields::new()
            .text("name", patch.name)
            .text("model", patch.model)
            .text("brand", patch.brand);
        let q = update("sneakers", "id", id, set)
            .ok_or_else(|| AppError::BadRequest("no fields to update".into()))?;
        tracing::debug!(sql = %q.sql, "query");
        let result = bind_all(sqlx::query(&q.sql), &q.params).execute(pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("no sneakers found with id {}", id)));
        }
        Ok(())
    }

    /// Delete a sneaker; its information, availability and scrapper rows cascade.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sneakers WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("no sneakers found with id {}", id)));
        }
        Ok(())
    }
}
