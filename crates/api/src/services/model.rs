//! Postgres-backed [`ModelService`].
//!
//! Any member of a model's owning application may read it; only `OWNER` and
//! `ADMIN` members may change it. Non-members get `NotFound` so model and
//! application GUIDs are not disclosed to outsiders.
//!
//! Successful get-model calls are counted per model and day in
//! `model_statistics`. A failed counter update is logged and does not fail
//! the read.

use frs_core::api_keys::{generate_api_key, generate_guid};
use frs_core::error::CoreError;
use frs_core::model::{AppModelAccess, Model, ModelCreateDto, ModelService, ModelUpdateDto};
use frs_core::roles::can_write_models;
use frs_core::types::DbId;
use frs_db::models::app::App;
use frs_db::models::model::ModelRow;
use frs_db::repositories::{AppRepo, ModelRepo, ModelStatisticRepo};
use frs_db::DbPool;

#[derive(Clone)]
pub struct PgModelService {
    pool: DbPool,
}

impl PgModelService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_app(&self, app_guid: &str) -> Result<App, CoreError> {
        AppRepo::find_by_guid(&self.pool, app_guid)
            .await
            .map_err(db_error)?
            .ok_or_else(|| CoreError::not_found("App", app_guid))
    }

    async fn find_model(&self, guid: &str) -> Result<ModelRow, CoreError> {
        ModelRepo::find_by_guid(&self.pool, guid)
            .await
            .map_err(db_error)?
            .ok_or_else(|| CoreError::not_found("Model", guid))
    }

    /// Role of `user_id` in the app; non-members see `not_found` instead.
    async fn member_role(
        &self,
        app_id: DbId,
        user_id: DbId,
        not_found: impl FnOnce() -> CoreError,
    ) -> Result<String, CoreError> {
        AppRepo::find_member_role(&self.pool, app_id, user_id)
            .await
            .map_err(db_error)?
            .ok_or_else(not_found)
    }

    async fn require_writer(
        &self,
        app_id: DbId,
        user_id: DbId,
        not_found: impl FnOnce() -> CoreError,
    ) -> Result<(), CoreError> {
        let role = self.member_role(app_id, user_id, not_found).await?;
        if !can_write_models(&role) {
            return Err(CoreError::Forbidden(
                "Owner or Admin role in the application required".into(),
            ));
        }
        Ok(())
    }

    /// Load a model the caller may modify.
    async fn find_writable_model(&self, guid: &str, user_id: DbId) -> Result<ModelRow, CoreError> {
        let row = self.find_model(guid).await?;
        self.require_writer(row.app_id, user_id, || CoreError::not_found("Model", guid))
            .await?;
        Ok(row)
    }
}

#[async_trait::async_trait]
impl ModelService for PgModelService {
    async fn get_model(&self, guid: &str, user_id: DbId) -> Result<Model, CoreError> {
        let row = self.find_model(guid).await?;
        self.member_role(row.app_id, user_id, || CoreError::not_found("Model", guid))
            .await?;

        if let Err(e) = ModelStatisticRepo::record_call(&self.pool, row.id).await {
            tracing::warn!(model_guid = %guid, error = %e, "Failed to record model call");
        }

        Model::try_from(row)
    }

    async fn get_models(&self, app_guid: &str, user_id: DbId) -> Result<Vec<Model>, CoreError> {
        let app = self.find_app(app_guid).await?;
        self.member_role(app.id, user_id, || CoreError::not_found("App", app_guid))
            .await?;

        ModelRepo::list_by_app(&self.pool, app.id)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(Model::try_from)
            .collect()
    }

    async fn create_model(
        &self,
        dto: ModelCreateDto,
        org_guid: &str,
        app_guid: &str,
        user_id: DbId,
    ) -> Result<Model, CoreError> {
        let access_type = dto.access_type()?;

        let app = self.find_app(app_guid).await?;
        if app.organization_guid != org_guid {
            return Err(CoreError::not_found("App", app_guid));
        }
        self.require_writer(app.id, user_id, || CoreError::not_found("App", app_guid))
            .await?;

        let row = ModelRepo::create(
            &self.pool,
            &generate_guid(),
            dto.name.trim(),
            &generate_api_key(),
            access_type.as_str(),
            app.id,
        )
        .await
        .map_err(db_error)?;

        tracing::debug!(model_guid = %row.guid, app_id = app.id, "Model row inserted");
        Model::try_from(row)
    }

    async fn update_model(
        &self,
        dto: ModelUpdateDto,
        guid: &str,
        user_id: DbId,
    ) -> Result<Model, CoreError> {
        let access_type = dto.access_type()?;
        let existing = self.find_writable_model(guid, user_id).await?;

        let row = ModelRepo::update(
            &self.pool,
            existing.id,
            dto.name.trim(),
            access_type.map(AppModelAccess::as_str),
        )
        .await
        .map_err(db_error)?
        .ok_or_else(|| CoreError::not_found("Model", guid))?;

        Model::try_from(row)
    }

    async fn regenerate_api_key(&self, guid: &str, user_id: DbId) -> Result<(), CoreError> {
        let existing = self.find_writable_model(guid, user_id).await?;

        let updated = ModelRepo::update_api_key(&self.pool, existing.id, &generate_api_key())
            .await
            .map_err(db_error)?;
        if !updated {
            return Err(CoreError::not_found("Model", guid));
        }
        Ok(())
    }

    async fn delete_model(&self, guid: &str, user_id: DbId) -> Result<(), CoreError> {
        let existing = self.find_writable_model(guid, user_id).await?;

        let deleted = ModelRepo::delete(&self.pool, existing.id)
            .await
            .map_err(db_error)?;
        if !deleted {
            return Err(CoreError::not_found("Model", guid));
        }
        Ok(())
    }
}

/// Classify a sqlx error into a domain error.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to `Conflict`.
/// - Everything else maps to `Internal`.
fn db_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        // PostgreSQL unique constraint violation: error code 23505
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint == "uq_models_app_id_name" {
                return CoreError::Conflict(
                    "Model name is not unique within the application".into(),
                );
            }
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    CoreError::Internal(err.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn row_not_found_is_internal_here() {
        // Repositories use fetch_optional, so RowNotFound only means a bug.
        assert_matches!(db_error(sqlx::Error::RowNotFound), CoreError::Internal(_));
    }

    #[test]
    fn pool_timeout_is_internal() {
        assert_matches!(db_error(sqlx::Error::PoolTimedOut), CoreError::Internal(_));
    }
}
