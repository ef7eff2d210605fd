//! Shared models and helpers used across features

pub mod models;
pub mod paths;
