//! Scout Common - Shared configuration, error types, and logging for the
//! Scout report toolchain.
//!
//! This crate provides:
//! - Configuration types and loading
//! - Error types and handling utilities
//! - Logging setup

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, ObservabilityConfig, ReportConfig};
pub use error::{Error, Result};
pub use logging::init_logging;
