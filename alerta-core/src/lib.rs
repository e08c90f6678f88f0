// src/lib.rs

pub mod analytics;
pub mod config;
pub mod db;
pub mod repositories;
pub mod services;
pub mod tasks;
pub mod test_utils;
pub mod utils;

pub use alerta_common::error::{AckError, ChatError, Error, LifecycleError};
pub use db::Database;
