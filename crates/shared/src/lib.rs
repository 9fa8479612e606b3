//! Shared configuration and error types for Conveyor.
//!
//! This crate provides common types used across the other crates:
//! - Configuration management
//! - Application-wide error types

pub mod config;
pub mod error;

pub use config::{AppConfig, DatabaseConfig};
pub use error::{AppError, AppResult};
