//! Repository for the `apps` and `app_members` tables.

use sqlx::PgPool;
use frs_core::types::DbId;

use crate::models::app::App;

const APP_COLUMNS: &str = "a.id, o.guid AS organization_guid";

/// Read access to applications and their memberships.
pub struct AppRepo;

impl AppRepo {
    /// Find an application by its public GUID.
    pub async fn find_by_guid(pool: &PgPool, guid: &str) -> Result<Option<App>, sqlx::Error> {
        let query = format!(
            "SELECT {APP_COLUMNS} \
             FROM apps a \
             JOIN organizations o ON o.id = a.organization_id \
             WHERE a.guid = $1"
        );
        sqlx::query_as::<_, App>(&query)
            .bind(guid)
            .fetch_optional(pool)
            .await
    }

    /// Role of `user_id` in the application, or `None` when not a member.
    pub async fn find_member_role(
        pool: &PgPool,
        app_id: DbId,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT role FROM app_members WHERE app_id = $1 AND user_id = $2",
        )
        .bind(app_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
