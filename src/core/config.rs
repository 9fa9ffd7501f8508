//! Match configuration.
//!
//! A `GameConfig` plus its seed fully determines the deal and the opening
//! phase of a match.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::DeckKind;
use crate::rules::Phase;

/// Match setup parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt to each player and the size refills aim for (default: 6).
    pub hand_slots: usize,

    /// Which deck the stack is shuffled from (default: small, 36 cards).
    pub deck: DeckKind,

    /// Seed for the shuffle and the opening coin flip.
    pub seed: u64,

    /// Forced opening phase. `None` flips a coin between the two attack phases.
    pub starting_phase: Option<Phase>,

    /// Pause before refilling when the second player is about to attack.
    /// Presentation pacing only; `None` skips it.
    pub attack_delay: Option<Duration>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_slots: 6,
            deck: DeckKind::Small,
            seed: 42,
            starting_phase: None,
            attack_delay: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hand_slots(mut self, slots: usize) -> Self {
        assert!(slots > 0, "Hands need at least 1 slot");
        self.hand_slots = slots;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: DeckKind) -> Self {
        self.deck = deck;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Force the opening phase instead of flipping a coin.
    #[must_use]
    pub fn with_starting_phase(mut self, phase: Phase) -> Self {
        assert!(!phase.is_terminal(), "A match cannot start in a result phase");
        self.starting_phase = Some(phase);
        self
    }

    #[must_use]
    pub fn with_attack_delay(mut self, delay: Duration) -> Self {
        self.attack_delay = Some(delay);
        self
    }
}
