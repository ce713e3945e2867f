//! Titanic Common - Shared configuration, error types, and logging for the
//! Titanic Q&A service.
//!
//! This crate provides:
//! - Configuration types and loading
//! - The unified error type used across the service
//! - Logging setup and trace-id helpers

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, DataConfig, ObservabilityConfig, ServiceConfig};
pub use error::{Error, Result};
