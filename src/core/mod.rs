//! Core module: models, the requirement evaluator and report generation

pub mod audit;
pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod report;

pub use error::{AuditError, Result};
