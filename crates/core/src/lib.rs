//! Core types and configuration for the trader discovery system.
//!
//! This crate provides shared types used across all other crates:
//! - Trade records and per-address analysis results
//! - Configuration structures (heuristic thresholds, fetch and output settings)
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
