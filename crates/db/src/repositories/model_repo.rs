//! Repository for the `models` table.

use sqlx::PgPool;
use frs_core::types::DbId;

use crate::models::model::ModelRow;

/// Columns selected for [`ModelRow`]; expects `models m JOIN apps a`.
const MODEL_COLUMNS: &str = "\
    m.id, m.guid, m.name, m.api_key, m.access_type, m.app_id, \
    a.guid AS app_guid, m.created_at, m.updated_at";

/// Provides CRUD operations for models.
pub struct ModelRepo;

impl ModelRepo {
    /// Find a model by its public GUID.
    pub async fn find_by_guid(pool: &PgPool, guid: &str) -> Result<Option<ModelRow>, sqlx::Error> {
        let query = format!(
            "SELECT {MODEL_COLUMNS} \
             FROM models m \
             JOIN apps a ON a.id = m.app_id \
             WHERE m.guid = $1"
        );
        sqlx::query_as::<_, ModelRow>(&query)
            .bind(guid)
            .fetch_optional(pool)
            .await
    }

    /// List the models owned by an application, oldest first.
    pub async fn list_by_app(pool: &PgPool, app_id: DbId) -> Result<Vec<ModelRow>, sqlx::Error> {
        let query = format!(
            "SELECT {MODEL_COLUMNS} \
             FROM models m \
             JOIN apps a ON a.id = m.app_id \
             WHERE m.app_id = $1 \
             ORDER BY m.created_at, m.id"
        );
        sqlx::query_as::<_, ModelRow>(&query)
            .bind(app_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new model and return it.
    pub async fn create(
        pool: &PgPool,
        guid: &str,
        name: &str,
        api_key: &str,
        access_type: &str,
        app_id: DbId,
    ) -> Result<ModelRow, sqlx::Error> {
        let query = format!(
            "WITH m AS ( \
                INSERT INTO models (guid, name, api_key, access_type, app_id) \
                VALUES ($1, $2, $3, $4, $5) \
                RETURNING * \
             ) \
             SELECT {MODEL_COLUMNS} FROM m JOIN apps a ON a.id = m.app_id"
        );
        sqlx::query_as::<_, ModelRow>(&query)
            .bind(guid)
            .bind(name)
            .bind(api_key)
            .bind(access_type)
            .bind(app_id)
            .fetch_one(pool)
            .await
    }

    /// Update name and, when given, access type. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
        access_type: Option<&str>,
    ) -> Result<Option<ModelRow>, sqlx::Error> {
        let query = format!(
            "WITH m AS ( \
                UPDATE models SET \
                    name = $2, \
                    access_type = COALESCE($3, access_type), \
                    updated_at = now() \
                WHERE id = $1 \
                RETURNING * \
             ) \
             SELECT {MODEL_COLUMNS} FROM m JOIN apps a ON a.id = m.app_id"
        );
        sqlx::query_as::<_, ModelRow>(&query)
            .bind(id)
            .bind(name)
            .bind(access_type)
            .fetch_optional(pool)
            .await
    }

    /// Replace the API key. Returns `true` if a row was updated.
    pub async fn update_api_key(
        pool: &PgPool,
        id: DbId,
        api_key: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE models SET api_key = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(api_key)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a model. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM models WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
