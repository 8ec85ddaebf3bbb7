#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with guid {guid}")]
    NotFound { entity: &'static str, guid: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by GUID.
    pub fn not_found(entity: &'static str, guid: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            guid: guid.into(),
        }
    }
}
