//! The turn engine.
//!
//! `Game` owns both players, the table, the grave, the current phase and the
//! turn counter. Phases only move through [`PlayerActions::done`], which
//! refills hands and clears the board when a new attack phase starts.
//!
//! [`PlayerActions::done`]: super::PlayerActions::done

use tracing::{debug, info};

use super::actions::PlayerActions;
use crate::cards::{CardVec, Deck, Grave, Stack, Suit};
use crate::core::{GameConfig, GameRng, Player, Side};
use crate::rules::{Phase, Table};

/// Per-step action flags consumed by `done()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct ActionFlags {
    pub action_done: bool,
    pub take_up: bool,
    pub pass: bool,
}

/// A match between two named players.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    rng: GameRng,
    pub(super) player1: Player,
    pub(super) player2: Player,
    pub(super) table: Table,
    grave: Grave,
    pub(super) phase: Phase,
    turn: u32,
    pub(super) flags: ActionFlags,
}

impl Game {
    /// Shuffle, pick the opening phase and deal both hands.
    ///
    /// # Panics
    ///
    /// Panics if the players share a name or the deck cannot fill both hands.
    pub fn new(config: GameConfig, mut player1: Player, mut player2: Player) -> Self {
        assert_ne!(player1.name(), player2.name(), "Player names must be unique");
        assert!(config.hand_slots > 0, "Hands need at least 1 slot");
        assert!(
            Deck::new(config.deck).len() >= 2 * config.hand_slots,
            "Deck too small to deal two hands of {}",
            config.hand_slots
        );

        let mut rng = GameRng::new(config.seed);
        let (table, phase) = deal(&config, &mut rng, &mut player1, &mut player2);

        Self {
            config,
            rng,
            player1,
            player2,
            table,
            grave: Grave::new(),
            phase,
            turn: 0,
            flags: ActionFlags::default(),
        }
    }

    /// Start from an arranged position instead of a deal.
    ///
    /// Hands are taken as they are on the players.
    pub fn with_state(config: GameConfig, player1: Player, player2: Player, table: Table, phase: Phase) -> Self {
        assert_ne!(player1.name(), player2.name(), "Player names must be unique");
        let rng = GameRng::new(config.seed);
        Self {
            config,
            rng,
            player1,
            player2,
            table,
            grave: Grave::new(),
            phase,
            turn: 0,
            flags: ActionFlags::default(),
        }
    }

    /// Redeal a fresh match with the same players and config.
    ///
    /// The shuffle comes from a fork of the match RNG, so successive resets
    /// produce different but reproducible deals.
    pub fn reset(&mut self) {
        self.rng = self.rng.fork();
        let (table, phase) = deal(&self.config, &mut self.rng, &mut self.player1, &mut self.player2);
        self.table = table;
        self.phase = phase;
        self.grave = Grave::new();
        self.turn = 0;
        self.flags = ActionFlags::default();
    }

    /// The gated action surface.
    pub fn actions(&mut self) -> PlayerActions<'_> {
        PlayerActions::new(self)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn player1(&self) -> &Player {
        &self.player1
    }

    #[must_use]
    pub fn player2(&self) -> &Player {
        &self.player2
    }

    #[must_use]
    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::One => &self.player1,
            Side::Two => &self.player2,
        }
    }

    /// Which seat `name` occupies.
    #[must_use]
    pub fn side_of(&self, name: &str) -> Option<Side> {
        if self.player1.name() == name {
            Some(Side::One)
        } else if self.player2.name() == name {
            Some(Side::Two)
        } else {
            None
        }
    }

    #[must_use]
    pub fn attacker(&self) -> Option<&Player> {
        self.phase.attacker().map(|side| self.player(side))
    }

    #[must_use]
    pub fn defender(&self) -> Option<&Player> {
        self.phase.defender().map(|side| self.player(side))
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn grave(&self) -> &Grave {
        &self.grave
    }

    #[must_use]
    pub fn trump_suit(&self) -> Suit {
        self.table.trump_suit()
    }

    #[must_use]
    pub fn attacking_cards(&self) -> CardVec {
        self.table.board().attacking_cards()
    }

    #[must_use]
    pub fn defending_cards(&self) -> CardVec {
        self.table.board().defending_cards()
    }

    #[must_use]
    pub fn stack_len(&self) -> usize {
        self.table.stack().len()
    }

    #[must_use]
    pub fn grave_len(&self) -> usize {
        self.grave.len()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Winning side once the match is over. `None` while playing or on a draw.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.phase.winner()
    }

    /// End the match if the stack is exhausted and a hand is empty.
    ///
    /// Returns whether a result phase was entered. The turn counter advances
    /// when it is.
    pub fn determine_winner(&mut self) -> bool {
        if self.phase.is_terminal() || !self.table.stack().is_empty() {
            return false;
        }
        let winner = match (self.player1.hand.is_empty(), self.player2.hand.is_empty()) {
            (true, true) => None,
            (true, false) => Some(Side::One),
            (false, true) => Some(Side::Two),
            (false, false) => return false,
        };

        self.phase = Phase::result(winner);
        self.turn += 1;
        match winner {
            Some(side) => info!(winner = self.player(side).name(), turn = self.turn, "match won"),
            None => info!(turn = self.turn, "match drawn"),
        }
        true
    }

    /// Both players with `first` leading, plus the table, borrowed at once.
    pub(super) fn seats_mut(&mut self, first: Side) -> (&mut Player, &mut Player, &mut Table) {
        let Game {
            player1,
            player2,
            table,
            ..
        } = self;
        match first {
            Side::One => (player1, player2, table),
            Side::Two => (player2, player1, table),
        }
    }

    pub(super) fn next_turn(&mut self, next: Phase) {
        debug!(from = %self.phase, to = %next, turn = self.turn, "phase transition");

        if let Some(next_attacker) = next.attacker().filter(|_| next.is_attack()) {
            if next == Phase::Player2Attack {
                if let Some(delay) = self.config.attack_delay {
                    std::thread::sleep(delay);
                }
            }
            self.table.clear_into(&mut self.grave);
            let (first, second, table) = self.seats_mut(next_attacker.other());
            table.refill(first, second);
        }

        self.phase = next;
        self.turn += 1;
        self.determine_winner();
    }
}

fn deal(config: &GameConfig, rng: &mut GameRng, player1: &mut Player, player2: &mut Player) -> (Table, Phase) {
    let stack = Stack::shuffled(Deck::new(config.deck), rng);
    let mut table = Table::new(stack);

    let phase = config.starting_phase.unwrap_or_else(|| {
        if rng.coin_flip() {
            Phase::Player1Attack
        } else {
            Phase::Player2Attack
        }
    });

    table.deal(player1, config.hand_slots);
    table.deal(player2, config.hand_slots);

    info!(
        phase = %phase,
        trump = %table.trump_card(),
        player1 = player1.name(),
        player2 = player2.name(),
        "match started"
    );
    (table, phase)
}
