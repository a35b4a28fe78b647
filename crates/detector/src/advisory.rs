//! Shark advice: a coarse calm/alert summary of recent fish.

use crate::messages::FishMessenger;
use fish_core::{FishEvent, FishKind};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Total event count at which the verdict turns to alert regardless of kinds.
pub const ALERT_TOTAL: usize = 5;

/// Advisory verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Calm,
    Alert,
}

impl Verdict {
    /// Verdict for the given counts.
    pub fn from_counts(thicc: usize, leverage: usize, total: usize) -> Self {
        if thicc > 0 || leverage > 0 || total >= ALERT_TOTAL {
            Verdict::Alert
        } else {
            Verdict::Calm
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Verdict::Calm => "Water is calm. Wait for more fish.",
            Verdict::Alert => "Big fish detected! Shark mode: ON.",
        }
    }
}

/// Summary of fish seen over a timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharkAdvice {
    pub verdict: Verdict,
    pub headline: String,
    pub shark_message: String,
    pub thicc_fish: usize,
    pub leverage_fish: usize,
    pub total_fish: usize,
    pub timeframe_min: i64,
}

/// Builds shark advice with its own phrase source.
pub struct Advisor {
    messenger: Mutex<FishMessenger>,
}

impl Advisor {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            messenger: Mutex::new(FishMessenger::new(seed)),
        }
    }

    /// Summarize events already restricted to the timeframe.
    pub fn summarize(&self, events: &[FishEvent], timeframe_min: i64) -> SharkAdvice {
        let thicc_fish = count_kind(events, FishKind::ThiccFish);
        let leverage_fish = count_kind(events, FishKind::LeverageFish);
        let total_fish = events.len();
        let verdict = Verdict::from_counts(thicc_fish, leverage_fish, total_fish);

        SharkAdvice {
            verdict,
            headline: verdict.headline().to_string(),
            shark_message: self.messenger.lock().shark_advice().to_string(),
            thicc_fish,
            leverage_fish,
            total_fish,
            timeframe_min,
        }
    }
}

fn count_kind(events: &[FishEvent], kind: FishKind) -> usize {
    events.iter().filter(|e| e.kind == kind).count()
}
