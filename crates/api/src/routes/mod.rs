pub mod health;
pub mod model;

use axum::Router;

use crate::state::AppState;

/// Build the model route tree, mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /org/{org_guid}/app/{app_guid}/models               list
/// /org/{org_guid}/app/{app_guid}/model                create (POST)
/// /org/{org_guid}/app/{app_guid}/model/{guid}         get, update, delete
/// /org/{org_guid}/app/{app_guid}/model/{guid}/apikey  regenerate key (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/org/{org_guid}/app/{app_guid}", model::router())
}
