//! Fish detector.
//!
//! Owns the trade window and event history behind one lock. Each ingest runs
//! window update, statistics, classification, history append and observer
//! notification as one atomic step; each query is atomic as well.

use crate::classifier::FishClassifier;
use crate::clock::{Clock, SystemClock};
use crate::history::EventHistory;
use crate::messages::FishMessenger;
use crate::observer::{FishObserver, LogObserver};
use crate::window::TradeWindow;
use fish_core::{to_ts_ms, Config, FishEvent, Trade};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// State guarded by the detector lock.
struct DetectorState {
    window: TradeWindow,
    history: EventHistory,
    messenger: FishMessenger,
    /// Trades ingested since creation or the last clear.
    trades_seen: u64,
}

/// Shared fish detector.
pub struct FishDetector {
    state: Mutex<DetectorState>,
    classifier: FishClassifier,
    clock: Arc<dyn Clock>,
    observers: Vec<Arc<dyn FishObserver>>,
}

impl FishDetector {
    /// Create a detector from configuration, using wall-clock time and
    /// logging every event.
    pub fn new(config: &Config) -> Self {
        Self {
            state: Mutex::new(DetectorState {
                window: TradeWindow::new(config.detector.window_capacity),
                history: EventHistory::new(config.detector.history_capacity),
                messenger: FishMessenger::new(config.detector.rng_seed),
                trades_seen: 0,
            }),
            classifier: FishClassifier::new(config.rules.clone()),
            clock: Arc::new(SystemClock),
            observers: vec![Arc::new(LogObserver)],
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register an additional observer.
    pub fn with_observer(mut self, observer: Arc<dyn FishObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Drop all observers, including the default logger.
    pub fn without_observers(mut self) -> Self {
        self.observers.clear();
        self
    }

    /// Process one trade. Returns the event when the trade was classified.
    pub fn ingest(&self, trade: Trade) -> Option<FishEvent> {
        let mut guard = self.state.lock();
        let now = self.clock.now();
        let DetectorState {
            window,
            history,
            messenger,
            trades_seen,
        } = &mut *guard;

        *trades_seen += 1;
        window.append(trade);
        let snapshot = window.snapshot();
        let trade = snapshot.last()?;

        let Some(rule) = self.classifier.classify(trade, snapshot, to_ts_ms(now)) else {
            debug!(
                symbol = %trade.symbol,
                price = trade.price,
                quantity = trade.quantity,
                "Trade not classified"
            );
            return None;
        };

        let message = messenger.pick(rule.kind()).to_string();
        let event = FishEvent::new(trade.clone(), rule, message, now);
        history.append(event.clone());

        for observer in &self.observers {
            observer.on_fish(&event);
        }
        Some(event)
    }

    /// Events detected strictly after `now - since`, oldest first.
    ///
    /// A lookback too large to represent returns the whole history.
    pub fn recent_events(&self, since: Duration) -> Vec<FishEvent> {
        let state = self.state.lock();
        let now = self.clock.now();
        let cutoff = chrono::Duration::from_std(since)
            .ok()
            .and_then(|d| now.checked_sub_signed(d));

        match cutoff {
            Some(cutoff) => state.history.since(cutoff),
            None => state.history.all(),
        }
    }

    /// Number of trades in the window.
    pub fn window_len(&self) -> usize {
        self.state.lock().window.len()
    }

    /// Number of events in the history.
    pub fn history_len(&self) -> usize {
        self.state.lock().history.len()
    }

    /// Total trades ingested.
    pub fn trades_seen(&self) -> u64 {
        self.state.lock().trades_seen
    }

    /// Clear window, history and counters.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.window.clear();
        state.history.clear();
        state.trades_seen = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use fish_core::{FishKind, FishRule};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // 2024-01-01 12:00:00 UTC
    const NOON: i64 = 1_704_110_400_000;

    fn make_trade(timestamp: i64, quantity: f64, leverage: f64) -> Trade {
        Trade {
            symbol: "BTCUSDT".to_string(),
            price: 50000.0,
            quantity,
            timestamp,
            is_buyer_maker: false,
            leverage,
        }
    }

    fn seeded_config() -> Config {
        let mut config = Config::default();
        config.detector.rng_seed = Some(7);
        config
    }

    fn detector_at(clock: &Arc<ManualClock>) -> FishDetector {
        FishDetector::new(&seeded_config())
            .without_observers()
            .with_clock(clock.clone())
    }

    #[derive(Default)]
    struct CountingObserver {
        seen: AtomicUsize,
    }

    impl FishObserver for CountingObserver {
        fn on_fish(&self, _event: &FishEvent) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_first_trade_is_average_against_itself() {
        let clock = Arc::new(ManualClock::from_millis(NOON));
        let detector = detector_at(&clock);

        // Window holds only this trade, so median == quantity
        let event = detector.ingest(make_trade(NOON - 3_600_000, 5.0, 0.0)).unwrap();
        assert_eq!(event.rule, FishRule::Average);
        assert_eq!(detector.window_len(), 1);
        assert_eq!(detector.history_len(), 1);
    }

    #[test]
    fn test_huge_fish_after_baseline() {
        let clock = Arc::new(ManualClock::from_millis(NOON));
        let detector = detector_at(&clock);

        for i in 0..9 {
            detector.ingest(make_trade(NOON - 3_600_000 + i * 1000, 1.0, 0.0));
        }
        let event = detector.ingest(make_trade(NOON, 25.0, 0.0)).unwrap();

        assert_eq!(event.kind, FishKind::ThiccFish);
        assert_eq!(event.rule.key(), "anomaly: huge fish");
        assert!(crate::messages::phrases(FishKind::ThiccFish).contains(&event.message.as_str()));
        assert_eq!(event.detected_at, clock.now());
    }

    #[test]
    fn test_dust_not_recorded() {
        let clock = Arc::new(ManualClock::from_millis(NOON));
        let detector = detector_at(&clock);

        assert!(detector.ingest(make_trade(NOON, 0.01, 0.0)).is_none());
        assert_eq!(detector.window_len(), 1);
        assert_eq!(detector.history_len(), 0);
        assert_eq!(detector.trades_seen(), 1);
    }

    #[test]
    fn test_window_bounded() {
        let clock = Arc::new(ManualClock::from_millis(NOON));
        let mut config = seeded_config();
        config.detector.window_capacity = 50;
        let detector = FishDetector::new(&config)
            .without_observers()
            .with_clock(clock.clone());

        for i in 0..120 {
            detector.ingest(make_trade(NOON - 3_600_000 + i, 1.0, 0.0));
        }
        assert_eq!(detector.window_len(), 50);
        assert_eq!(detector.trades_seen(), 120);
    }

    #[test]
    fn test_history_bounded_fifo() {
        let clock = Arc::new(ManualClock::from_millis(NOON));
        let mut config = seeded_config();
        config.detector.history_capacity = 5;
        let detector = FishDetector::new(&config)
            .without_observers()
            .with_clock(clock.clone());

        // Identical unit trades an hour old: every one is an average fish
        for i in 0..8 {
            clock.advance(chrono::Duration::seconds(1));
            assert!(detector.ingest(make_trade(NOON - 3_600_000 + i, 1.0, 0.0)).is_some());
        }
        assert_eq!(detector.history_len(), 5);

        let events = detector.recent_events(Duration::from_secs(3600));
        let ts: Vec<i64> = events.iter().map(|e| e.trade.timestamp).collect();
        assert_eq!(ts, (3..8).map(|i| NOON - 3_600_000 + i).collect::<Vec<_>>());
    }

    #[test]
    fn test_recent_events_zero_is_empty() {
        let clock = Arc::new(ManualClock::from_millis(NOON));
        let detector = detector_at(&clock);

        assert!(detector.ingest(make_trade(NOON, 1.0, 0.0)).is_some());
        assert!(detector.recent_events(Duration::ZERO).is_empty());
        assert_eq!(detector.recent_events(Duration::from_secs(10)).len(), 1);
    }

    #[test]
    fn test_recent_events_with_system_clock() {
        let detector = FishDetector::new(&seeded_config()).without_observers();
        assert!(detector.ingest(make_trade(NOON, 1.0, 0.0)).is_some());
        assert!(detector.recent_events(Duration::ZERO).is_empty());
    }

    #[test]
    fn test_recent_events_window() {
        let clock = Arc::new(ManualClock::from_millis(NOON));
        let detector = detector_at(&clock);

        detector.ingest(make_trade(NOON - 3_600_000, 1.0, 0.0));
        clock.advance(chrono::Duration::seconds(30));
        detector.ingest(make_trade(NOON - 3_600_000, 1.0, 0.0));
        clock.advance(chrono::Duration::seconds(5));

        assert_eq!(detector.recent_events(Duration::from_secs(10)).len(), 1);
        assert_eq!(detector.recent_events(Duration::from_secs(60)).len(), 2);
        assert_eq!(detector.recent_events(Duration::MAX).len(), 2);
    }

    #[test]
    fn test_observers_notified() {
        let clock = Arc::new(ManualClock::from_millis(NOON));
        let observer = Arc::new(CountingObserver::default());
        let detector = detector_at(&clock).with_observer(observer.clone());

        detector.ingest(make_trade(NOON, 1.0, 0.0));
        detector.ingest(make_trade(NOON, 0.01, 0.0));
        detector.ingest(make_trade(NOON, 1.0, 0.0));

        assert_eq!(observer.seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clear() {
        let clock = Arc::new(ManualClock::from_millis(NOON));
        let detector = detector_at(&clock);
        detector.ingest(make_trade(NOON, 1.0, 0.0));
        detector.clear();
        assert_eq!(detector.window_len(), 0);
        assert_eq!(detector.history_len(), 0);
        assert_eq!(detector.trades_seen(), 0);
    }

    #[test]
    fn test_concurrent_readers() {
        let detector = Arc::new(FishDetector::new(&seeded_config()).without_observers());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let detector = Arc::clone(&detector);
                std::thread::spawn(move || {
                    let mut last = 0;
                    for _ in 0..200 {
                        let events = detector.recent_events(Duration::from_secs(3600));
                        // History only grows here, and never exceeds its bound
                        assert!(events.len() >= last);
                        assert!(events.len() <= 10_000);
                        last = events.len();
                    }
                })
            })
            .collect();

        for i in 0..2000 {
            detector.ingest(make_trade(NOON + i, 1.0, 0.0));
        }
        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(detector.window_len(), 1000);
        assert_eq!(detector.trades_seen(), 2000);
    }
}
