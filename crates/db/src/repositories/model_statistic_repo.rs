//! Repository for the `model_statistics` table.

use sqlx::PgPool;
use frs_core::types::DbId;

use crate::models::model_statistic::ModelStatistic;

const STATISTIC_COLUMNS: &str = "model_id, stat_date, request_count";

/// Daily call counters for models.
pub struct ModelStatisticRepo;

impl ModelStatisticRepo {
    /// Count one call against today's bucket, creating it if needed.
    pub async fn record_call(pool: &PgPool, model_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO model_statistics (model_id, request_count) VALUES ($1, 1) \
             ON CONFLICT ON CONSTRAINT uq_model_statistics_model_id_stat_date \
             DO UPDATE SET \
                 request_count = model_statistics.request_count + 1, \
                 updated_at = now()",
        )
        .bind(model_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// All buckets for a model, oldest day first.
    pub async fn list_by_model(
        pool: &PgPool,
        model_id: DbId,
    ) -> Result<Vec<ModelStatistic>, sqlx::Error> {
        let query = format!(
            "SELECT {STATISTIC_COLUMNS} FROM model_statistics \
             WHERE model_id = $1 \
             ORDER BY stat_date"
        );
        sqlx::query_as::<_, ModelStatistic>(&query)
            .bind(model_id)
            .fetch_all(pool)
            .await
    }
}
