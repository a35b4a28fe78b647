//! Rule-based fish classification.
//!
//! Rules are evaluated in strict priority order and the first match wins:
//!
//! 1. Dust below the noise floor is never classified
//! 2. Huge fish: far above the median and above an absolute size
//! 3. YOLO fish: very high leverage on an above-median trade
//! 4. Pump fish: large trade after a sharp price rise
//! 5. Dump fish: large trade after a sharp price fall
//! 6. Night whale: large trade during the UTC night hours
//! 7. High roller: large trade at the edge of the recent range
//! 8. Cluster fish: volume burst over a short period
//! 9. Average fish: at least median-sized trade

use crate::stats;
use fish_core::{FishRule, RulesConfig, TimestampMs, Trade};

/// Stateless trade classifier.
#[derive(Debug, Clone, Default)]
pub struct FishClassifier {
    rules: RulesConfig,
}

impl FishClassifier {
    /// Create a classifier with the given thresholds.
    pub fn new(rules: RulesConfig) -> Self {
        Self { rules }
    }

    /// Classify `trade` against the window snapshot at time `now_ms`.
    ///
    /// The snapshot is expected to already contain `trade` when called from
    /// the ingest path. Returns the matching rule, whose kind is
    /// [`FishRule::kind`], or `None` when the trade is not a fish.
    ///
    /// Non-finite values are not rejected up front. A NaN fails every
    /// comparison, so only the rules that compare it stop matching.
    pub fn classify(&self, trade: &Trade, window: &[Trade], now_ms: TimestampMs) -> Option<FishRule> {
        let r = &self.rules;
        let qty = trade.quantity;

        if qty < r.noise_floor_qty {
            return None;
        }

        let median = stats::median_quantity(window);

        if qty > r.huge_median_multiple * median && qty > r.huge_min_qty && median > 0.0 {
            return Some(FishRule::HugeFish);
        }

        if trade.leverage >= r.leverage_min && qty > r.leverage_median_multiple * median {
            return Some(FishRule::Yolo);
        }

        let big_mover = qty > r.move_median_multiple * median;
        if big_mover
            && stats::price_jumped(trade, window, now_ms, r.move_lookback_secs, r.move_ratio)
        {
            return Some(FishRule::Pump);
        }
        if big_mover
            && stats::price_dropped(trade, window, now_ms, r.move_lookback_secs, r.move_ratio)
        {
            return Some(FishRule::Dump);
        }

        if self.is_night(trade) && qty > r.night_median_multiple * median {
            return Some(FishRule::NightWhale);
        }

        if qty > r.range_median_multiple * median {
            let hl = stats::trailing_high_low(window, now_ms, r.range_lookback_secs);
            if hl.is_valid()
                && (trade.price >= r.range_high_band * hl.high
                    || trade.price <= r.range_low_band * hl.low)
            {
                return Some(FishRule::HighRoller);
            }
        }

        if median > r.cluster_min_median
            && stats::cluster_volume(
                window,
                now_ms,
                r.cluster_period_secs,
                r.cluster_median_multiple * median,
            )
        {
            return Some(FishRule::Cluster);
        }

        if qty >= median && median > 0.0 {
            return Some(FishRule::Average);
        }

        None
    }

    fn is_night(&self, trade: &Trade) -> bool {
        trade
            .utc_hour()
            .map(|h| h >= self.rules.night_start_hour && h <= self.rules.night_end_hour)
            .unwrap_or(false)
    }
}
