//! Trade payload ingestion for the fish-detector system.
//!
//! This crate handles:
//! - Binance trade payload decoding (raw and combined-stream envelopes)
//! - Normalization into core `Trade` values
//! - Ingestion quality statistics

pub mod normalizer;

pub use normalizer::{NormalizerStats, TradeNormalizer};
