//! Query operations exposed to an outer API layer.
//!
//! Raw request parameters are resolved against [`QueryConfig`]: missing or
//! out-of-range values fall back to the configured default.

use crate::advisory::{Advisor, SharkAdvice};
use crate::detector::FishDetector;
use fish_core::{FishEvent, QueryConfig};
use std::sync::Arc;
use std::time::Duration;

/// Resolve a seconds lookback: positive values are accepted as-is.
pub fn resolve_seconds(requested: Option<i64>, default: i64) -> i64 {
    match requested {
        Some(secs) if secs > 0 => secs,
        _ => default,
    }
}

/// Resolve a minutes lookback: accepted within `1..=max`.
pub fn resolve_minutes(requested: Option<i64>, default: i64, max: i64) -> i64 {
    match requested {
        Some(min) if min > 0 && min <= max => min,
        _ => default,
    }
}

fn secs(value: i64) -> Duration {
    Duration::from_secs(value.max(0) as u64)
}

/// Query facade over a shared detector.
pub struct FishQueries {
    detector: Arc<FishDetector>,
    advisor: Advisor,
    config: QueryConfig,
}

impl FishQueries {
    pub fn new(detector: Arc<FishDetector>, advisor: Advisor, config: QueryConfig) -> Self {
        Self {
            detector,
            advisor,
            config,
        }
    }

    /// Fish detected in the last `seconds` (default 10).
    pub fn check_fish(&self, seconds: Option<i64>) -> Vec<FishEvent> {
        let seconds = resolve_seconds(seconds, self.config.check_default_secs);
        self.detector.recent_events(secs(seconds))
    }

    /// Fish detected in the last `minutes` (default 5, at most 60).
    pub fn fish_history(&self, minutes: Option<i64>) -> Vec<FishEvent> {
        let minutes = resolve_minutes(
            minutes,
            self.config.history_default_minutes,
            self.config.max_minutes,
        );
        self.detector.recent_events(secs(minutes.saturating_mul(60)))
    }

    /// Advisory summary over the last `minutes` (default 3, at most 60).
    pub fn shark_advice(&self, minutes: Option<i64>) -> SharkAdvice {
        let minutes = resolve_minutes(
            minutes,
            self.config.advice_default_minutes,
            self.config.max_minutes,
        );
        let recent = self.detector.recent_events(secs(minutes.saturating_mul(60)));
        self.advisor.summarize(&recent, minutes)
    }

    pub fn detector(&self) -> &Arc<FishDetector> {
        &self.detector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::Verdict;
    use crate::clock::ManualClock;
    use fish_core::{Config, Trade};

    // 2024-01-01 12:00:00 UTC
    const NOON: i64 = 1_704_110_400_000;

    fn make_trade(quantity: f64) -> Trade {
        Trade {
            symbol: "BTCUSDT".to_string(),
            price: 50000.0,
            quantity,
            timestamp: NOON - 3_600_000,
            is_buyer_maker: false,
            leverage: 0.0,
        }
    }

    fn setup() -> (Arc<ManualClock>, FishQueries) {
        let clock = Arc::new(ManualClock::from_millis(NOON));
        let mut config = Config::default();
        config.detector.rng_seed = Some(3);
        let detector = Arc::new(
            FishDetector::new(&config)
                .without_observers()
                .with_clock(clock.clone()),
        );
        let queries = FishQueries::new(detector, Advisor::new(Some(3)), config.query.clone());
        (clock, queries)
    }

    #[test]
    fn test_resolve_seconds() {
        assert_eq!(resolve_seconds(None, 10), 10);
        assert_eq!(resolve_seconds(Some(0), 10), 10);
        assert_eq!(resolve_seconds(Some(-5), 10), 10);
        assert_eq!(resolve_seconds(Some(7200), 10), 7200);
    }

    #[test]
    fn test_resolve_minutes() {
        assert_eq!(resolve_minutes(None, 5, 60), 5);
        assert_eq!(resolve_minutes(Some(0), 5, 60), 5);
        assert_eq!(resolve_minutes(Some(61), 5, 60), 5);
        assert_eq!(resolve_minutes(Some(60), 5, 60), 60);
        assert_eq!(resolve_minutes(Some(1), 3, 60), 1);
    }

    #[test]
    fn test_check_fish_default_lookback() {
        let (clock, queries) = setup();
        queries.detector().ingest(make_trade(1.0));
        clock.advance(chrono::Duration::seconds(11));
        queries.detector().ingest(make_trade(1.0));

        assert_eq!(queries.check_fish(None).len(), 1);
        assert_eq!(queries.check_fish(Some(-1)).len(), 1);
        assert_eq!(queries.check_fish(Some(30)).len(), 2);
    }

    #[test]
    fn test_fish_history_caps_minutes() {
        let (clock, queries) = setup();
        queries.detector().ingest(make_trade(1.0));
        clock.advance(chrono::Duration::minutes(10));
        queries.detector().ingest(make_trade(1.0));

        // Default 5 minutes
        assert_eq!(queries.fish_history(None).len(), 1);
        // Over the cap falls back to the default
        assert_eq!(queries.fish_history(Some(120)).len(), 1);
        assert_eq!(queries.fish_history(Some(15)).len(), 2);
    }

    #[test]
    fn test_shark_advice_five_events_alert() {
        let (clock, queries) = setup();
        for _ in 0..5 {
            clock.advance(chrono::Duration::seconds(1));
            assert!(queries.detector().ingest(make_trade(1.0)).is_some());
        }

        let advice = queries.shark_advice(None);
        assert_eq!(advice.timeframe_min, 3);
        assert_eq!(advice.thicc_fish, 0);
        assert_eq!(advice.leverage_fish, 0);
        assert_eq!(advice.total_fish, 5);
        assert_eq!(advice.verdict, Verdict::Alert);
    }

    #[test]
    fn test_shark_advice_calm() {
        let (_clock, queries) = setup();
        queries.detector().ingest(make_trade(1.0));

        let advice = queries.shark_advice(Some(99));
        assert_eq!(advice.timeframe_min, 3);
        assert_eq!(advice.total_fish, 1);
        assert_eq!(advice.verdict, Verdict::Calm);
    }
}
