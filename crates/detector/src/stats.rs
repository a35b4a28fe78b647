//! Window statistics.
//!
//! Stateless computations over a window snapshot. Time-bounded statistics
//! take the current time in epoch milliseconds and only consider trades with
//! `timestamp >= now - period`.

use fish_core::{TimestampMs, Trade};
use ordered_float::OrderedFloat;

/// Trailing price range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighLow {
    /// Highest price, 0 when no trade qualified.
    pub high: f64,
    /// Lowest price, `f64::MAX` when no trade qualified.
    pub low: f64,
}

impl HighLow {
    /// Range of an empty period.
    pub const EMPTY: HighLow = HighLow {
        high: 0.0,
        low: f64::MAX,
    };

    /// Whether any trade contributed to the range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.high > 0.0
    }
}

/// Oldest timestamp still inside a trailing period.
#[inline]
fn period_start(now_ms: TimestampMs, period_secs: i64) -> TimestampMs {
    now_ms.saturating_sub(period_secs.saturating_mul(1000))
}

/// Trades inside the trailing period.
fn in_period(
    window: &[Trade],
    now_ms: TimestampMs,
    period_secs: i64,
) -> impl Iterator<Item = &Trade> + '_ {
    let start = period_start(now_ms, period_secs);
    window.iter().filter(move |t| t.timestamp >= start)
}

/// Median trade quantity; 0 for an empty window.
///
/// Even counts average the two middle values. NaN quantities sort last.
pub fn median_quantity(window: &[Trade]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }

    let mut quantities: Vec<OrderedFloat<f64>> =
        window.iter().map(|t| OrderedFloat(t.quantity)).collect();
    quantities.sort_unstable();

    let mid = quantities.len() / 2;
    if quantities.len() % 2 == 0 {
        (quantities[mid - 1].0 + quantities[mid].0) / 2.0
    } else {
        quantities[mid].0
    }
}

/// Highest and lowest price over the trailing period.
pub fn trailing_high_low(window: &[Trade], now_ms: TimestampMs, period_secs: i64) -> HighLow {
    in_period(window, now_ms, period_secs).fold(HighLow::EMPTY, |mut acc, t| {
        if t.price > acc.high {
            acc.high = t.price;
        }
        if t.price < acc.low {
            acc.low = t.price;
        }
        acc
    })
}

/// Whether `trade` is more than `ratio` above the lowest price of the lookback.
pub fn price_jumped(
    trade: &Trade,
    window: &[Trade],
    now_ms: TimestampMs,
    lookback_secs: i64,
    ratio: f64,
) -> bool {
    let min_price = in_period(window, now_ms, lookback_secs)
        .map(|t| t.price)
        .fold(trade.price, |min, p| if p < min { p } else { min });

    if !(min_price.is_finite() && min_price > 0.0) {
        return false;
    }
    (trade.price - min_price) / min_price > ratio
}

/// Whether `trade` is more than `ratio` below the highest price of the lookback.
pub fn price_dropped(
    trade: &Trade,
    window: &[Trade],
    now_ms: TimestampMs,
    lookback_secs: i64,
    ratio: f64,
) -> bool {
    let max_price = in_period(window, now_ms, lookback_secs)
        .map(|t| t.price)
        .fold(trade.price, |max, p| if p > max { p } else { max });

    if !(max_price.is_finite() && max_price > 0.0) {
        return false;
    }
    (max_price - trade.price) / max_price > ratio
}

/// Total quantity traded over the trailing period.
pub fn trailing_volume(window: &[Trade], now_ms: TimestampMs, period_secs: i64) -> f64 {
    in_period(window, now_ms, period_secs).map(|t| t.quantity).sum()
}

/// Whether the trailing volume exceeds `threshold`.
pub fn cluster_volume(
    window: &[Trade],
    now_ms: TimestampMs,
    period_secs: i64,
    threshold: f64,
) -> bool {
    trailing_volume(window, now_ms, period_secs) > threshold
}
