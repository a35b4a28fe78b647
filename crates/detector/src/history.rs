//! Bounded history of classified events.

use crate::buffer::RingBuffer;
use chrono::{DateTime, Utc};
use fish_core::FishEvent;

/// Default number of events kept in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10000;

/// Arrival-ordered buffer of recent fish events.
#[derive(Debug, Clone)]
pub struct EventHistory {
    events: RingBuffer<FishEvent>,
}

impl EventHistory {
    /// Create a history holding at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            events: RingBuffer::new(capacity),
        }
    }

    /// Append an event, evicting the oldest one when full.
    pub fn append(&mut self, event: FishEvent) {
        self.events.push(event);
    }

    /// Events detected strictly after `cutoff`, in insertion order.
    pub fn since(&self, cutoff: DateTime<Utc>) -> Vec<FishEvent> {
        self.events
            .iter()
            .filter(|evt| evt.detected_at > cutoff)
            .cloned()
            .collect()
    }

    /// All events, oldest first.
    pub fn all(&self) -> Vec<FishEvent> {
        self.events.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for EventHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use fish_core::{FishRule, Trade};

    fn make_event(detected_at: DateTime<Utc>, quantity: f64) -> FishEvent {
        let trade = Trade {
            symbol: "BTCUSDT".to_string(),
            price: 50000.0,
            quantity,
            timestamp: detected_at.timestamp_millis(),
            is_buyer_maker: false,
            leverage: 0.0,
        };
        FishEvent::new(trade, FishRule::Average, "Just keep swimming.".to_string(), detected_at)
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fifo_bound() {
        let mut history = EventHistory::default();
        for i in 0..10_050 {
            history.append(make_event(base() + Duration::milliseconds(i), i as f64));
        }
        assert_eq!(history.len(), 10_000);

        let all = history.all();
        assert_eq!(all[0].trade.quantity, 50.0);
        assert_eq!(all[9_999].trade.quantity, 10_049.0);
    }

    #[test]
    fn test_since_is_strict() {
        let mut history = EventHistory::new(10);
        history.append(make_event(base(), 1.0));
        history.append(make_event(base() + Duration::seconds(1), 2.0));
        history.append(make_event(base() + Duration::seconds(2), 3.0));

        let recent = history.since(base() + Duration::seconds(1));
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].trade.quantity, 3.0);

        assert_eq!(history.since(base() - Duration::seconds(1)).len(), 3);
        assert!(history.since(base() + Duration::seconds(2)).is_empty());
    }

    #[test]
    fn test_since_preserves_order_with_unordered_times() {
        let mut history = EventHistory::new(10);
        history.append(make_event(base() + Duration::seconds(5), 1.0));
        history.append(make_event(base() + Duration::seconds(3), 2.0));
        history.append(make_event(base() + Duration::seconds(9), 3.0));

        let qty: Vec<f64> = history.since(base()).iter().map(|e| e.trade.quantity).collect();
        assert_eq!(qty, vec![1.0, 2.0, 3.0]);
    }
}
