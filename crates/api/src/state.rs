use std::sync::Arc;

use frs_core::model::ModelService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Model business operations the handlers delegate to.
    pub model_service: Arc<dyn ModelService>,
}
