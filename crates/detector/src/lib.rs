//! Fish detection for the fish-detector system.
//!
//! This crate handles:
//! - Bounded trade window and event history
//! - Window statistics (median size, trailing range, price moves, bursts)
//! - Priority-ordered fish classification
//! - The shared detector and its query facade
//! - Shark advice summaries

pub mod advisory;
pub mod buffer;
pub mod classifier;
pub mod clock;
pub mod detector;
pub mod history;
pub mod messages;
pub mod observer;
pub mod query;
pub mod stats;
pub mod window;

pub use advisory::{Advisor, SharkAdvice, Verdict};
pub use classifier::FishClassifier;
pub use clock::{Clock, ManualClock, SystemClock};
pub use detector::FishDetector;
pub use history::EventHistory;
pub use messages::FishMessenger;
pub use observer::{FishObserver, LogObserver};
pub use query::FishQueries;
pub use window::TradeWindow;
