//! Trade payload normalization.
//!
//! Decodes Binance trade stream messages into core [`Trade`] values. Both the
//! raw stream format (`/ws/btcusdt@trade`) and the combined-stream envelope
//! (`{"stream": ..., "data": {...}}`) are accepted.

use fish_core::{Error, IngestionConfig, Result, Trade};
use serde::Deserialize;
use tracing::debug;

/// Statistics about normalization quality.
#[derive(Debug, Clone, Default)]
pub struct NormalizerStats {
    /// Payloads turned into trades.
    pub accepted: u64,
    /// Payloads that failed to decode.
    pub rejected: u64,
    /// Valid trades dropped by the symbol filter.
    pub filtered: u64,
    /// Total quantity of accepted trades.
    pub total_volume: f64,
}

impl NormalizerStats {
    /// Fraction of payloads that failed to decode.
    pub fn reject_frac(&self) -> f64 {
        let total = self.accepted + self.rejected + self.filtered;
        if total > 0 {
            self.rejected as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Binance trade payload. Prices and quantities arrive as decimal strings.
#[derive(Debug, Deserialize)]
struct RawTrade {
    #[serde(rename = "e", default)]
    event_type: Option<String>,
    #[serde(rename = "s")]
    symbol: String,
    #[serde(rename = "p")]
    price: String,
    #[serde(rename = "q")]
    quantity: String,
    #[serde(rename = "T")]
    trade_time: i64,
    #[serde(rename = "m")]
    is_buyer_maker: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Combined {
        #[allow(dead_code)]
        stream: String,
        data: RawTrade,
    },
    Raw(RawTrade),
}

impl Payload {
    fn into_raw(self) -> RawTrade {
        match self {
            Payload::Combined { data, .. } => data,
            Payload::Raw(raw) => raw,
        }
    }
}

/// Normalizer turning exchange payloads into trades.
pub struct TradeNormalizer {
    /// Leverage assigned to every trade (spot payloads carry none).
    default_leverage: f64,
    /// Upper-cased symbol filter.
    symbol: Option<String>,
    /// Normalization statistics.
    stats: NormalizerStats,
}

impl TradeNormalizer {
    /// Create a normalizer accepting all symbols with zero leverage.
    pub fn new() -> Self {
        Self::from_config(&IngestionConfig::default())
    }

    /// Create a normalizer from configuration.
    pub fn from_config(config: &IngestionConfig) -> Self {
        Self {
            default_leverage: config.default_leverage,
            symbol: config.symbol.as_ref().map(|s| s.to_uppercase()),
            stats: NormalizerStats::default(),
        }
    }

    /// Normalize one payload.
    ///
    /// Returns `Ok(None)` when the trade is valid but filtered out by symbol.
    pub fn normalize(&mut self, payload: &str) -> Result<Option<Trade>> {
        match self.decode(payload) {
            Ok(trade) => {
                if let Some(ref wanted) = self.symbol {
                    if !trade.symbol.eq_ignore_ascii_case(wanted) {
                        self.stats.filtered += 1;
                        return Ok(None);
                    }
                }
                self.stats.accepted += 1;
                self.stats.total_volume += trade.quantity;
                Ok(Some(trade))
            }
            Err(e) => {
                self.stats.rejected += 1;
                debug!(error = %e, "Rejected trade payload");
                Err(e)
            }
        }
    }

    fn decode(&self, payload: &str) -> Result<Trade> {
        let raw = serde_json::from_str::<Payload>(payload)?.into_raw();

        if let Some(ref event_type) = raw.event_type {
            if event_type != "trade" && event_type != "aggTrade" {
                return Err(Error::data(format!("unexpected event type '{}'", event_type)));
            }
        }

        let price = parse_decimal("price", &raw.price)?;
        let quantity = parse_decimal("quantity", &raw.quantity)?;

        Ok(Trade {
            symbol: raw.symbol,
            price,
            quantity,
            timestamp: raw.trade_time,
            is_buyer_maker: raw.is_buyer_maker,
            leverage: self.default_leverage,
        })
    }

    /// Get normalization statistics.
    pub fn stats(&self) -> &NormalizerStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

impl Default for TradeNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_decimal(field: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| Error::data(format!("invalid {} '{}': {}", field, value, e)))
}
