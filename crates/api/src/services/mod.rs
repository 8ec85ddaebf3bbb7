//! Implementations of the domain service traits.

pub mod model;

pub use model::PgModelService;
