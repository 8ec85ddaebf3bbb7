//! Face-recognition model domain types, request/response DTOs, and the
//! [`ModelService`] seam the HTTP layer delegates to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MODEL_NAME_REQUIRED: &str = "Model name is required";
pub const ACCESS_TYPE_INVALID: &str = "Application access type to model is not correct";

// ---------------------------------------------------------------------------
// Access type
// ---------------------------------------------------------------------------

/// Access level the owning application has to a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppModelAccess {
    /// The application may only run recognition against the model.
    #[serde(rename = "READONLY")]
    ReadOnly,
    /// The application may also add faces to the model.
    #[default]
    Train,
}

impl AppModelAccess {
    pub fn as_str(self) -> &'static str {
        match self {
            AppModelAccess::ReadOnly => "READONLY",
            AppModelAccess::Train => "TRAIN",
        }
    }
}

impl fmt::Display for AppModelAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppModelAccess {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READONLY" => Ok(AppModelAccess::ReadOnly),
            "TRAIN" => Ok(AppModelAccess::Train),
            _ => Err(CoreError::Validation(ACCESS_TYPE_INVALID.into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain model
// ---------------------------------------------------------------------------

/// A model as returned by the service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub id: DbId,
    pub guid: String,
    pub name: String,
    pub api_key: String,
    pub access_type: AppModelAccess,
    /// GUID of the application that owns the model.
    pub app_guid: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /model`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_access_type", skip_on_field_errors = false))]
pub struct ModelCreateDto {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    /// `"READONLY"` or `"TRAIN"`; defaults to `TRAIN` when omitted.
    pub access_type: Option<String>,
}

impl ModelCreateDto {
    /// Parsed access type, falling back to the default when omitted.
    pub fn access_type(&self) -> Result<AppModelAccess, CoreError> {
        self.access_type
            .as_deref()
            .map_or(Ok(AppModelAccess::default()), str::parse)
    }
}

/// Body of `PUT /model/{guid}`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_access_type", skip_on_field_errors = false))]
pub struct ModelUpdateDto {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    /// When omitted the stored access type is kept.
    pub access_type: Option<String>,
}

impl ModelUpdateDto {
    pub fn access_type(&self) -> Result<Option<AppModelAccess>, CoreError> {
        self.access_type.as_deref().map(str::parse).transpose()
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(MODEL_NAME_REQUIRED.into()));
    }
    Ok(())
}

fn check_access_type(value: Option<&str>) -> Result<(), ValidationError> {
    match value.map(str::parse::<AppModelAccess>) {
        Some(Err(_)) => {
            Err(ValidationError::new("access_type").with_message(ACCESS_TYPE_INVALID.into()))
        }
        _ => Ok(()),
    }
}

fn validate_create_access_type(dto: &ModelCreateDto) -> Result<(), ValidationError> {
    check_access_type(dto.access_type.as_deref())
}

fn validate_update_access_type(dto: &ModelUpdateDto) -> Result<(), ValidationError> {
    check_access_type(dto.access_type.as_deref())
}

// ---------------------------------------------------------------------------
// Response DTO
// ---------------------------------------------------------------------------

/// Model as exposed at the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponseDto {
    /// Public GUID of the model.
    pub id: String,
    pub name: String,
    pub api_key: String,
    pub access_type: AppModelAccess,
    /// Application GUID the model was requested through.
    pub app_guid: String,
}

impl ModelResponseDto {
    /// Map a domain model, stamping it with the application GUID the caller
    /// addressed. The model's own `app_guid` is ignored.
    pub fn from_model(model: Model, app_guid: &str) -> Self {
        Self {
            id: model.guid,
            name: model.name,
            api_key: model.api_key,
            access_type: model.access_type,
            app_guid: app_guid.to_string(),
        }
    }

    pub fn from_models(models: Vec<Model>, app_guid: &str) -> Vec<Self> {
        models
            .into_iter()
            .map(|m| Self::from_model(m, app_guid))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Service seam
// ---------------------------------------------------------------------------

/// Business operations on models. `user_id` is the authenticated caller.
///
/// Implementations own lookup, access control, and persistence. Errors are
/// returned as [`CoreError`] and surface unchanged at the HTTP boundary.
#[async_trait::async_trait]
pub trait ModelService: Send + Sync {
    async fn get_model(&self, guid: &str, user_id: DbId) -> Result<Model, CoreError>;

    async fn get_models(&self, app_guid: &str, user_id: DbId) -> Result<Vec<Model>, CoreError>;

    async fn create_model(
        &self,
        dto: ModelCreateDto,
        org_guid: &str,
        app_guid: &str,
        user_id: DbId,
    ) -> Result<Model, CoreError>;

    async fn update_model(
        &self,
        dto: ModelUpdateDto,
        guid: &str,
        user_id: DbId,
    ) -> Result<Model, CoreError>;

    async fn regenerate_api_key(&self, guid: &str, user_id: DbId) -> Result<(), CoreError>;

    async fn delete_model(&self, guid: &str, user_id: DbId) -> Result<(), CoreError>;
}
