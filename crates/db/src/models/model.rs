//! Model rows and their conversion into the domain [`Model`].

use sqlx::FromRow;
use frs_core::error::CoreError;
use frs_core::model::Model;
use frs_core::types::{DbId, Timestamp};

/// A row from the `models` table joined with the owning app's GUID.
#[derive(Debug, Clone, FromRow)]
pub struct ModelRow {
    pub id: DbId,
    pub guid: String,
    pub name: String,
    pub api_key: String,
    pub access_type: String,
    pub app_id: DbId,
    pub app_guid: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ModelRow> for Model {
    type Error = CoreError;

    fn try_from(row: ModelRow) -> Result<Self, Self::Error> {
        let access_type = row.access_type.parse().map_err(|_| {
            CoreError::Internal(format!(
                "model {} has unknown access type '{}'",
                row.guid, row.access_type
            ))
        })?;

        Ok(Model {
            id: row.id,
            guid: row.guid,
            name: row.name,
            api_key: row.api_key,
            access_type,
            app_guid: row.app_guid,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use frs_core::model::AppModelAccess;

    use super::*;

    fn row(access_type: &str) -> ModelRow {
        let now = chrono::Utc::now();
        ModelRow {
            id: 1,
            guid: "m-1".into(),
            name: "faces".into(),
            api_key: "k".into(),
            access_type: access_type.into(),
            app_id: 3,
            app_guid: "a-1".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn converts_row_with_known_access_type() {
        let model = Model::try_from(row("READONLY")).unwrap();
        assert_eq!(model.access_type, AppModelAccess::ReadOnly);
        assert_eq!(model.app_guid, "a-1");
        assert_eq!(model.guid, "m-1");
    }

    #[test]
    fn unknown_access_type_is_an_internal_error() {
        assert_matches!(Model::try_from(row("BOGUS")), Err(CoreError::Internal(_)));
    }
}
