//! Core data types for the fish-detector system.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Size/quantity type.
pub type Size = f64;

/// Convert a UTC datetime to epoch milliseconds.
#[inline]
pub fn to_ts_ms(dt: DateTime<Utc>) -> TimestampMs {
    dt.timestamp_millis()
}

/// UTC hour of day (0-23) for an epoch-millisecond timestamp.
///
/// Returns `None` when the timestamp is outside chrono's representable range.
#[inline]
pub fn utc_hour(ts_ms: TimestampMs) -> Option<u32> {
    DateTime::<Utc>::from_timestamp_millis(ts_ms).map(|dt| dt.hour())
}

/// A single trade (execution) from the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Instrument symbol (e.g., "BTCUSDT").
    pub symbol: String,
    /// Trade price.
    pub price: f64,
    /// Trade size.
    pub quantity: Size,
    /// Exchange timestamp in milliseconds.
    pub timestamp: TimestampMs,
    /// Whether the buyer was the resting (maker) side.
    pub is_buyer_maker: bool,
    /// Leverage used, 0 when unlevered or unknown.
    #[serde(default)]
    pub leverage: f64,
}

impl Trade {
    /// Notional value in quote currency.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }

    /// Aggressor side as displayed to users.
    #[inline]
    pub fn side(&self) -> TradeSide {
        TradeSide::from_buyer_maker(self.is_buyer_maker)
    }

    /// UTC hour of day of the exchange timestamp.
    #[inline]
    pub fn utc_hour(&self) -> Option<u32> {
        utc_hour(self.timestamp)
    }
}

/// Aggressor side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    /// Taker bought (seller was resting).
    Buy,
    /// Taker sold (buyer was resting).
    Sell,
}

impl TradeSide {
    /// A resting buyer means the aggressor sold.
    #[inline]
    pub fn from_buyer_maker(is_buyer_maker: bool) -> Self {
        if is_buyer_maker {
            TradeSide::Sell
        } else {
            TradeSide::Buy
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification label ("fish type") assigned to a trade.
///
/// An unclassified trade is represented by `None` at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FishKind {
    /// Outsized trade relative to the window.
    ThiccFish,
    /// Large trade during the night hours.
    SleepyFish,
    /// Large trade into a sharp price drop.
    DumbFish,
    /// Ordinary or clustered activity.
    NormieFish,
    /// Highly levered trade.
    LeverageFish,
}

impl FishKind {
    /// All kinds, in catalog order.
    pub const ALL: [FishKind; 5] = [
        FishKind::ThiccFish,
        FishKind::SleepyFish,
        FishKind::DumbFish,
        FishKind::NormieFish,
        FishKind::LeverageFish,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            FishKind::ThiccFish => "THICC FISH",
            FishKind::SleepyFish => "SLEEPY FISH",
            FishKind::DumbFish => "DUMB FISH",
            FishKind::NormieFish => "ORDINARY FISH",
            FishKind::LeverageFish => "LEVERAGE FISH",
        }
    }

    /// Position in [`FishKind::ALL`], used to index per-kind tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FishKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The classifier rule that matched a trade.
///
/// Variants are listed in evaluation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishRule {
    /// Quantity dwarfs the window median.
    #[serde(rename = "anomaly: huge fish")]
    HugeFish,
    /// Very high leverage on an above-median trade.
    #[serde(rename = "YOLO fish")]
    Yolo,
    /// Large trade riding a price jump.
    #[serde(rename = "pump fish")]
    Pump,
    /// Large trade riding a price drop.
    #[serde(rename = "dump fish")]
    Dump,
    /// Large trade in the night hours.
    #[serde(rename = "night whale")]
    NightWhale,
    /// Large trade at the edge of the recent range.
    #[serde(rename = "high roller")]
    HighRoller,
    /// Burst of volume in a short period.
    #[serde(rename = "cluster fish")]
    Cluster,
    /// At least median-sized trade.
    #[serde(rename = "average fish")]
    Average,
}

impl FishRule {
    /// Stable message key.
    pub fn key(self) -> &'static str {
        match self {
            FishRule::HugeFish => "anomaly: huge fish",
            FishRule::Yolo => "YOLO fish",
            FishRule::Pump => "pump fish",
            FishRule::Dump => "dump fish",
            FishRule::NightWhale => "night whale",
            FishRule::HighRoller => "high roller",
            FishRule::Cluster => "cluster fish",
            FishRule::Average => "average fish",
        }
    }

    /// Kind assigned when this rule matches.
    pub fn kind(self) -> FishKind {
        match self {
            FishRule::HugeFish | FishRule::Pump | FishRule::HighRoller => FishKind::ThiccFish,
            FishRule::Yolo => FishKind::LeverageFish,
            FishRule::Dump => FishKind::DumbFish,
            FishRule::NightWhale => FishKind::SleepyFish,
            FishRule::Cluster | FishRule::Average => FishKind::NormieFish,
        }
    }
}

impl fmt::Display for FishRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A classified trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishEvent {
    /// Copy of the trade that was classified.
    pub trade: Trade,
    /// Assigned kind.
    pub kind: FishKind,
    /// Rule that produced the kind.
    pub rule: FishRule,
    /// Advisory phrase for the kind.
    pub message: String,
    /// Wall-clock time of classification.
    pub detected_at: DateTime<Utc>,
}

impl FishEvent {
    /// Create an event; the kind is derived from the rule.
    pub fn new(trade: Trade, rule: FishRule, message: String, detected_at: DateTime<Utc>) -> Self {
        Self {
            trade,
            kind: rule.kind(),
            rule,
            message,
            detected_at,
        }
    }
}
