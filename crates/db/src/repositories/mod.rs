//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod app_repo;
pub mod model_repo;
pub mod model_statistic_repo;

pub use app_repo::AppRepo;
pub use model_repo::ModelRepo;
pub use model_statistic_repo::ModelStatisticRepo;
