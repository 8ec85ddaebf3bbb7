use sqlx::FromRow;
use frs_core::types::DbId;

/// An application as needed for model access checks: its id and the GUID of
/// the organization it belongs to.
#[derive(Debug, Clone, FromRow)]
pub struct App {
    pub id: DbId,
    pub organization_guid: String,
}
