use sqlx::FromRow;
use frs_core::types::{Date, DbId};

/// Per-model, per-day count of get-model calls.
#[derive(Debug, Clone, FromRow)]
pub struct ModelStatistic {
    pub model_id: DbId,
    pub stat_date: Date,
    pub request_count: i64,
}
