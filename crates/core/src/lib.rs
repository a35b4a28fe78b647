//! Core types and configuration for the fish-detector system.
//!
//! This crate provides shared types used across all other crates:
//! - Market data types (trades, classified fish events)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, DetectorConfig, IngestionConfig, QueryConfig, RulesConfig};
pub use error::{Error, Result};
pub use types::*;
