//! Shared library for `DegreeAudit`
//! Contains the requirement evaluator and prerequisite checker used by the CLI

pub mod core;
pub mod logger;
pub mod shared;

pub use core::config;
pub use shared::*;
