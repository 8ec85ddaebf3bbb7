//! Domain types shared by the FRS model service crates.
//!
//! Zero internal dependencies so both the repository layer and the HTTP
//! layer can use it.

pub mod api_keys;
pub mod error;
pub mod model;
pub mod roles;
pub mod types;
