//! Handlers for models nested under `/org/{org_guid}/app/{app_guid}`.
//!
//! Each handler extracts path, body, and caller, makes exactly one
//! [`ModelService`](frs_core::model::ModelService) call, and maps the result.
//! Service errors are returned unchanged.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use frs_core::model::{ModelCreateDto, ModelResponseDto, ModelUpdateDto};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Path parameters of application-level routes.
#[derive(Debug, Deserialize)]
pub struct AppPath {
    pub org_guid: String,
    pub app_guid: String,
}

/// Path parameters of routes addressing a single model.
#[derive(Debug, Deserialize)]
pub struct ModelPath {
    pub org_guid: String,
    pub app_guid: String,
    pub guid: String,
}

/// GET /org/{org_guid}/app/{app_guid}/model/{guid}
pub async fn get_model(
    user: AuthUser,
    State(state): State<AppState>,
    Path(path): Path<ModelPath>,
) -> AppResult<Json<ModelResponseDto>> {
    let model = state
        .model_service
        .get_model(&path.guid, user.user_id)
        .await?;

    Ok(Json(ModelResponseDto::from_model(model, &path.app_guid)))
}

/// GET /org/{org_guid}/app/{app_guid}/models
pub async fn list_models(
    user: AuthUser,
    State(state): State<AppState>,
    Path(path): Path<AppPath>,
) -> AppResult<Json<Vec<ModelResponseDto>>> {
    let models = state
        .model_service
        .get_models(&path.app_guid, user.user_id)
        .await?;

    Ok(Json(ModelResponseDto::from_models(models, &path.app_guid)))
}

/// POST /org/{org_guid}/app/{app_guid}/model
///
/// Returns 201. The body is validated before the service is called.
pub async fn create_model(
    user: AuthUser,
    State(state): State<AppState>,
    Path(path): Path<AppPath>,
    ValidatedJson(input): ValidatedJson<ModelCreateDto>,
) -> AppResult<impl IntoResponse> {
    let model = state
        .model_service
        .create_model(input, &path.org_guid, &path.app_guid, user.user_id)
        .await?;

    tracing::info!(
        model_guid = %model.guid,
        org_guid = %path.org_guid,
        app_guid = %path.app_guid,
        user_id = user.user_id,
        "Model created",
    );

    Ok((
        StatusCode::CREATED,
        Json(ModelResponseDto::from_model(model, &path.app_guid)),
    ))
}

/// PUT /org/{org_guid}/app/{app_guid}/model/{guid}
pub async fn update_model(
    user: AuthUser,
    State(state): State<AppState>,
    Path(path): Path<ModelPath>,
    ValidatedJson(input): ValidatedJson<ModelUpdateDto>,
) -> AppResult<Json<ModelResponseDto>> {
    let model = state
        .model_service
        .update_model(input, &path.guid, user.user_id)
        .await?;

    tracing::info!(
        model_guid = %path.guid,
        user_id = user.user_id,
        "Model updated",
    );

    Ok(Json(ModelResponseDto::from_model(model, &path.app_guid)))
}

/// PUT /org/{org_guid}/app/{app_guid}/model/{guid}/apikey
///
/// Returns 200 with an empty body.
pub async fn regenerate_api_key(
    user: AuthUser,
    State(state): State<AppState>,
    Path(path): Path<ModelPath>,
) -> AppResult<StatusCode> {
    state
        .model_service
        .regenerate_api_key(&path.guid, user.user_id)
        .await?;

    tracing::info!(
        model_guid = %path.guid,
        app_guid = %path.app_guid,
        user_id = user.user_id,
        "Model API key regenerated",
    );

    Ok(StatusCode::OK)
}

/// DELETE /org/{org_guid}/app/{app_guid}/model/{guid}
///
/// Returns 200 with an empty body.
pub async fn delete_model(
    user: AuthUser,
    State(state): State<AppState>,
    Path(path): Path<ModelPath>,
) -> AppResult<StatusCode> {
    state
        .model_service
        .delete_model(&path.guid, user.user_id)
        .await?;

    tracing::info!(
        model_guid = %path.guid,
        app_guid = %path.app_guid,
        user_id = user.user_id,
        "Model deleted",
    );

    Ok(StatusCode::OK)
}
