//! Route definitions for models, mounted at `/org/{org_guid}/app/{app_guid}`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::model;
use crate::state::AppState;

/// ```text
/// GET    /model/{guid}          -> get_model
/// PUT    /model/{guid}          -> update_model
/// DELETE /model/{guid}          -> delete_model
/// PUT    /model/{guid}/apikey   -> regenerate_api_key
/// POST   /model                 -> create_model
/// GET    /models                -> list_models
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/models", get(model::list_models))
        .route("/model", post(model::create_model))
        .route(
            "/model/{guid}",
            get(model::get_model)
                .put(model::update_model)
                .delete(model::delete_model),
        )
        .route("/model/{guid}/apikey", put(model::regenerate_api_key))
}
