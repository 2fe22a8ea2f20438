//! Shared types, errors, and configuration for pfi.
//!
//! This crate provides common types used across all other crates:
//! - Amount parsing with thousands separators
//! - Application-wide error types and exit codes
//! - Configuration management (rendering and fixture generation)

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, GeneratorConfig, RenderConfig};
pub use error::{AppError, AppResult};
