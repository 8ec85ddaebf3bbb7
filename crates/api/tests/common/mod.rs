//! Shared helpers for the API integration tests.
//!
//! Requests go straight into the router through `tower::ServiceExt::oneshot`,
//! backed by an in-memory [`RecordingModelService`] so no database is needed.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use frs_api::auth::jwt::{Claims, JwtConfig};
use frs_api::config::ServerConfig;
use frs_api::router::build_app_router;
use frs_api::state::AppState;
use frs_core::error::CoreError;
use frs_core::model::{AppModelAccess, Model, ModelCreateDto, ModelService, ModelUpdateDto};
use frs_core::types::DbId;

/// Caller id embedded in every token minted by the helpers.
pub const TEST_USER_ID: DbId = 17;

/// App GUID the fake service stamps on every model it returns. Deliberately
/// different from any GUID the tests put in the path.
pub const SERVICE_APP_GUID: &str = "service-owned-app";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
        },
    }
}

/// Build the full application router around the given service.
pub fn build_test_app(service: Arc<RecordingModelService>) -> Router {
    let state = AppState {
        config: Arc::new(test_config()),
        model_service: service,
    };
    build_app_router(state)
}

/// A valid bearer token for [`TEST_USER_ID`].
pub fn bearer() -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: TEST_USER_ID,
        exp: now + 15 * 60,
        iat: now,
        jti: uuid::Uuid::new_v4().to_string(),
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(test_config().jwt.secret.as_bytes()),
    )
    .unwrap();
    format!("Bearer {token}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn authed(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, bearer())
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, authed(Method::GET, uri).body(Body::empty()).unwrap()).await
}

pub async fn put(app: Router, uri: &str) -> Response<Body> {
    send(app, authed(Method::PUT, uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, authed(Method::DELETE, uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = authed(method, uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Recording model service
// ---------------------------------------------------------------------------

/// A service call as the handler issued it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetModel {
        guid: String,
        user_id: DbId,
    },
    GetModels {
        app_guid: String,
        user_id: DbId,
    },
    CreateModel {
        name: String,
        access_type: Option<String>,
        org_guid: String,
        app_guid: String,
        user_id: DbId,
    },
    UpdateModel {
        name: String,
        access_type: Option<String>,
        guid: String,
        user_id: DbId,
    },
    RegenerateApiKey {
        guid: String,
        user_id: DbId,
    },
    DeleteModel {
        guid: String,
        user_id: DbId,
    },
}

/// In-memory [`ModelService`] that records every call it receives.
#[derive(Default)]
pub struct RecordingModelService {
    calls: Mutex<Vec<Call>>,
    models: Mutex<HashMap<String, Model>>,
    next_error: Mutex<Option<CoreError>>,
    next_id: Mutex<DbId>,
}

impl RecordingModelService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed a model and return its GUID.
    pub fn insert(&self, guid: &str, name: &str) -> String {
        let model = self.build_model(guid, name, AppModelAccess::Train);
        self.models
            .lock()
            .unwrap()
            .insert(guid.to_string(), model);
        guid.to_string()
    }

    /// Make the next service call fail with `err`.
    pub fn fail_next(&self, err: CoreError) {
        *self.next_error.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn api_key_of(&self, guid: &str) -> Option<String> {
        self.models
            .lock()
            .unwrap()
            .get(guid)
            .map(|m| m.api_key.clone())
    }

    pub fn contains(&self, guid: &str) -> bool {
        self.models.lock().unwrap().contains_key(guid)
    }

    fn build_model(&self, guid: &str, name: &str, access_type: AppModelAccess) -> Model {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let now = chrono::Utc::now();
        Model {
            id: *next_id,
            guid: guid.to_string(),
            name: name.to_string(),
            api_key: frs_core::api_keys::generate_api_key(),
            access_type,
            app_guid: SERVICE_APP_GUID.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn record(&self, call: Call) -> Result<(), CoreError> {
        self.calls.lock().unwrap().push(call);
        match self.next_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ModelService for RecordingModelService {
    async fn get_model(&self, guid: &str, user_id: DbId) -> Result<Model, CoreError> {
        self.record(Call::GetModel {
            guid: guid.to_string(),
            user_id,
        })?;
        self.models
            .lock()
            .unwrap()
            .get(guid)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Model", guid))
    }

    async fn get_models(&self, app_guid: &str, user_id: DbId) -> Result<Vec<Model>, CoreError> {
        self.record(Call::GetModels {
            app_guid: app_guid.to_string(),
            user_id,
        })?;
        let mut models: Vec<Model> = self.models.lock().unwrap().values().cloned().collect();
        models.sort_by_key(|m| m.id);
        Ok(models)
    }

    async fn create_model(
        &self,
        dto: ModelCreateDto,
        org_guid: &str,
        app_guid: &str,
        user_id: DbId,
    ) -> Result<Model, CoreError> {
        self.record(Call::CreateModel {
            name: dto.name.clone(),
            access_type: dto.access_type.clone(),
            org_guid: org_guid.to_string(),
            app_guid: app_guid.to_string(),
            user_id,
        })?;
        let guid = frs_core::api_keys::generate_guid();
        let model = self.build_model(&guid, &dto.name, dto.access_type()?);
        self.models.lock().unwrap().insert(guid, model.clone());
        Ok(model)
    }

    async fn update_model(
        &self,
        dto: ModelUpdateDto,
        guid: &str,
        user_id: DbId,
    ) -> Result<Model, CoreError> {
        self.record(Call::UpdateModel {
            name: dto.name.clone(),
            access_type: dto.access_type.clone(),
            guid: guid.to_string(),
            user_id,
        })?;
        let access_type = dto.access_type()?;
        let mut models = self.models.lock().unwrap();
        let model = models
            .get_mut(guid)
            .ok_or_else(|| CoreError::not_found("Model", guid))?;
        model.name = dto.name;
        if let Some(access_type) = access_type {
            model.access_type = access_type;
        }
        Ok(model.clone())
    }

    async fn regenerate_api_key(&self, guid: &str, user_id: DbId) -> Result<(), CoreError> {
        self.record(Call::RegenerateApiKey {
            guid: guid.to_string(),
            user_id,
        })?;
        let mut models = self.models.lock().unwrap();
        let model = models
            .get_mut(guid)
            .ok_or_else(|| CoreError::not_found("Model", guid))?;
        model.api_key = frs_core::api_keys::generate_api_key();
        Ok(())
    }

    async fn delete_model(&self, guid: &str, user_id: DbId) -> Result<(), CoreError> {
        self.record(Call::DeleteModel {
            guid: guid.to_string(),
            user_id,
        })?;
        self.models
            .lock()
            .unwrap()
            .remove(guid)
            .map(|_| ())
            .ok_or_else(|| CoreError::not_found("Model", guid))
    }
}
