//! Hooks notified synchronously for every classified event.

use fish_core::FishEvent;
use tracing::info;

/// Receives each fish event at classification time.
///
/// Called while the detector lock is held, so implementations must not call
/// back into the detector and should return quickly.
pub trait FishObserver: Send + Sync {
    fn on_fish(&self, event: &FishEvent);
}

/// Emits one structured `tracing` record per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl FishObserver for LogObserver {
    fn on_fish(&self, event: &FishEvent) {
        let trade = &event.trade;
        info!(
            kind = %event.kind,
            rule = %event.rule,
            symbol = %trade.symbol,
            price = trade.price,
            quantity = trade.quantity,
            usd = trade.notional(),
            side = %trade.side(),
            trade_ts = trade.timestamp,
            "{} ALERT! {}",
            event.kind,
            event.message
        );
    }
}
