//! Model GUID and API key generation.
//!
//! Both are random UUID v4 strings. The API key is handed to recognition
//! clients in plaintext, so it is stored as-is and returned in responses.

use uuid::Uuid;

/// Length of a hyphenated UUID string.
pub const KEY_LENGTH: usize = 36;

/// Generate a new public GUID for a model.
pub fn generate_guid() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a new random API key for a model.
pub fn generate_api_key() -> String {
    Uuid::new_v4().to_string()
}
