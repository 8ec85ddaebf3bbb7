//! Row types returned by the repositories.

pub mod app;
pub mod model;
pub mod model_statistic;
