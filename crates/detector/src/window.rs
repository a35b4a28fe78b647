//! Rolling window of the most recent raw trades.

use crate::buffer::RingBuffer;
use fish_core::Trade;

/// Default number of trades kept for statistics.
pub const DEFAULT_WINDOW_CAPACITY: usize = 1000;

/// Bounded, arrival-ordered buffer of recent trades.
#[derive(Debug, Clone)]
pub struct TradeWindow {
    trades: RingBuffer<Trade>,
}

impl TradeWindow {
    /// Create a window holding at most `capacity` trades.
    pub fn new(capacity: usize) -> Self {
        Self {
            trades: RingBuffer::new(capacity),
        }
    }

    /// Append a trade, evicting the oldest one when full.
    pub fn append(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    /// Current contents, oldest first, including the last appended trade.
    pub fn snapshot(&mut self) -> &[Trade] {
        self.trades.as_slice()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Clear all trades.
    pub fn clear(&mut self) {
        self.trades.clear();
    }
}

impl Default for TradeWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}
