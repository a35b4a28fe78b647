//! Advisory phrase catalog.

use fish_core::FishKind;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const THICC_FISH: &[&str] = &[
    "Big splash! That's a lot of fins in the water.",
    "Someone just moved the ocean.",
    "Thicc fish sighted — brace yourselves!",
    "Heavy swimmer! Hope you know where you're going.",
    "That's not just a fish, that's almost a submarine.",
    "That’s enough volume to make the kraken jealous.",
    "Making waves that reach the shore.",
    "Biggest fish since the last exchange maintenance.",
    "That trade just woke up the whales.",
    "Splash so big, we need a mop.",
    "Trading like there’s no tomorrow.",
    "When you can't decide — so you buy the whole sea.",
    "If that's not a statement, what is?",
];

const SLEEPY_FISH: &[&str] = &[
    "Night voyage: fish rarely sleep.",
    "Some fish prefer the moonlight.",
    "Trading at night — respect for dedication!",
    "Fish is up while others are counting plankton.",
    "Silent water at night, but some fish keep moving.",
    "Trading at night? The sea is calm, but the mind is stormy.",
    "You know it's night when even bots are yawning.",
    "Fish swimming in the dark, maybe dreaming of profits.",
    "While most sleep, some chase shadows.",
    "Trading by moonlight — hope you packed your night goggles.",
    "At this hour? Hope you set a stop-loss *and* an alarm clock.",
    "Risky trades and night raids — classic combo.",
    "Is it insomnia or just crypto FOMO?",
];

const DUMB_FISH: &[&str] = &[
    "Swimming against the current? Brave or bold?",
    "Some fish just love adventure — right into the net.",
    "Every journey needs a start — sometimes it starts at the top.",
    "Fish follows the shiny lure — classic move.",
    "Is that a wave or a leap of faith?",
    "Chasing bubbles since the dawn of time.",
    "Bought the top, sold the bottom — innovation!",
    "Making bold moves with questionable logic.",
    "Trust the plan... wait, what plan?",
    "Riding the wave — straight into the rocks.",
    "When in doubt, do the opposite of this fish.",
    "This fish thinks 'ATH' means 'Always Trade Here'.",
    "Knife-catching: Olympic edition.",
];

const NORMIE_FISH: &[&str] = &[
    "Just keep swimming.",
    "A regular day in the ocean.",
    "This fish is minding its own business.",
    "Sometimes you just need to swim for the sake of swimming.",
    "Not every swim is an adventure, but every fish counts.",
    "Just another day at the fish market.",
    "Swimming along, minding its own wallet.",
    "No drama, just fins and trades.",
    "If in doubt, just swim forward.",
    "Most fish just want a quiet swim.",
    "Not every trade is epic, but every fish is unique.",
    "In the ocean, even small ripples matter.",
    "No news is good news.",
];

const LEVERAGE_FISH: &[&str] = &[
    "Some fish use fins, some use turbo fins.",
    "Swimming with extra floaties — leverage detected.",
    "High tide, high risk — leverage in the ocean.",
    "Hope those fins are strong enough for the current!",
    "Fish went for a ride with the wind behind.",
    "Leverage on? May Poseidon help you.",
    "Some fish like to swim close to the edge.",
    "Turbo-fins activated: full risk ahead!",
    "Leverage: because the ocean isn’t dangerous enough.",
    "Liquidation is just an oceanic adventure.",
    "If this fish swims any faster, it’ll hit the reef.",
    "‘YOLO’ isn’t an investment strategy... unless you’re a leverage fish.",
    "Double or nothing — the fish way.",
];

/// Phrase tables indexed by [`FishKind::index`].
const CATALOG: [&[&str]; 5] = [THICC_FISH, SLEEPY_FISH, DUMB_FISH, NORMIE_FISH, LEVERAGE_FISH];

/// Shark advice phrases, independent of which kinds were seen.
pub const SHARK_ADVICE: &[&str] = &[
    "Lots of fish detected! Shark mode recommended.",
    "Blood in the water? Now’s your chance.",
    "Time to hunt — the school is in session.",
    "When the sea is full of fish, the sharks never sleep.",
    "Smells like opportunity. Shark, are you ready?",
    "Fins everywhere — don’t miss your feeding frenzy.",
    "Alert: Waters crowded. Perfect time for a big bite.",
    "Advice: When you see fish, move like a shark!",
    "Opportunity detected: deploy the shark!",
    "Scent of fresh fish in the water — action time.",
    "If you wait too long, someone else gets the sushi.",
    "Sharks don’t sleep, and neither should you right now.",
    "Feeding frenzy mode: ON.",
];

/// All phrases for a kind.
pub fn phrases(kind: FishKind) -> &'static [&'static str] {
    CATALOG[kind.index()]
}

/// Picks catalog phrases with its own random source.
#[derive(Debug, Clone)]
pub struct FishMessenger {
    rng: StdRng,
}

impl FishMessenger {
    /// Deterministic messenger for a seed, entropy-seeded when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Random phrase for a kind.
    pub fn pick(&mut self, kind: FishKind) -> &'static str {
        phrases(kind).choose(&mut self.rng).copied().unwrap_or_default()
    }

    /// Random shark advice phrase.
    pub fn shark_advice(&mut self) -> &'static str {
        SHARK_ADVICE.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_phrases() {
        for kind in FishKind::ALL {
            assert_eq!(phrases(kind).len(), 13, "{:?}", kind);
        }
        assert_eq!(SHARK_ADVICE.len(), 13);
    }

    #[test]
    fn test_phrases_keep_typography() {
        assert!(phrases(FishKind::ThiccFish).contains(&"Thicc fish sighted — brace yourselves!"));
        assert!(phrases(FishKind::LeverageFish)
            .contains(&"‘YOLO’ isn’t an investment strategy... unless you’re a leverage fish."));
        assert_eq!(SHARK_ADVICE[2], "Time to hunt — the school is in session.");
    }

    #[test]
    fn test_pick_comes_from_kind_table() {
        let mut messenger = FishMessenger::from_seed(42);
        for kind in FishKind::ALL {
            for _ in 0..20 {
                assert!(phrases(kind).contains(&messenger.pick(kind)));
            }
        }
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = FishMessenger::new(Some(7));
        let mut b = FishMessenger::new(Some(7));
        for _ in 0..10 {
            assert_eq!(a.pick(FishKind::ThiccFish), b.pick(FishKind::ThiccFish));
            assert_eq!(a.shark_advice(), b.shark_advice());
        }
    }

    #[test]
    fn test_shark_advice_covers_catalog() {
        let mut messenger = FishMessenger::from_seed(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(messenger.shark_advice());
        }
        assert_eq!(seen.len(), SHARK_ADVICE.len());
    }
}
