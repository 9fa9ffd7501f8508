//! Turn phases.
//!
//! Six active phases form two mirrored cycles
//! (`P1 attack -> P2 defend -> P1 counter-attack -> P2 defend -> ...` and its
//! mirror), plus three terminal result phases.

use serde::{Deserialize, Serialize};

use crate::core::Side;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Player1Attack,
    Player2Attack,
    Player1Defend,
    Player2Defend,
    Player1CounterAttack,
    Player2CounterAttack,

    Player1Wins,
    Player2Wins,
    Draw,
}

impl Phase {
    /// Default successor along the six-state cycle. Result phases map to
    /// themselves.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Phase::Player1Attack => Phase::Player2Defend,
            Phase::Player2Defend => Phase::Player1CounterAttack,
            Phase::Player1CounterAttack => Phase::Player2Defend,
            Phase::Player2Attack => Phase::Player1Defend,
            Phase::Player1Defend => Phase::Player2CounterAttack,
            Phase::Player2CounterAttack => Phase::Player1Defend,
            result => result,
        }
    }

    /// The same phase for the other player.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Phase::Player1Attack => Phase::Player2Attack,
            Phase::Player2Attack => Phase::Player1Attack,
            Phase::Player1Defend => Phase::Player2Defend,
            Phase::Player2Defend => Phase::Player1Defend,
            Phase::Player1CounterAttack => Phase::Player2CounterAttack,
            Phase::Player2CounterAttack => Phase::Player1CounterAttack,
            result => result,
        }
    }

    #[must_use]
    pub const fn attack(side: Side) -> Self {
        match side {
            Side::One => Phase::Player1Attack,
            Side::Two => Phase::Player2Attack,
        }
    }

    #[must_use]
    pub const fn defend(side: Side) -> Self {
        match side {
            Side::One => Phase::Player1Defend,
            Side::Two => Phase::Player2Defend,
        }
    }

    #[must_use]
    pub const fn counter_attack(side: Side) -> Self {
        match side {
            Side::One => Phase::Player1CounterAttack,
            Side::Two => Phase::Player2CounterAttack,
        }
    }

    /// Result phase for a winner, or `Draw` for `None`.
    #[must_use]
    pub const fn result(winner: Option<Side>) -> Self {
        match winner {
            Some(Side::One) => Phase::Player1Wins,
            Some(Side::Two) => Phase::Player2Wins,
            None => Phase::Draw,
        }
    }

    /// The side expected to act in this phase.
    #[must_use]
    pub const fn turn(self) -> Option<Side> {
        match self {
            Phase::Player1Attack | Phase::Player1Defend | Phase::Player1CounterAttack => {
                Some(Side::One)
            }
            Phase::Player2Attack | Phase::Player2Defend | Phase::Player2CounterAttack => {
                Some(Side::Two)
            }
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_player1_turn(self) -> bool {
        matches!(self.turn(), Some(Side::One))
    }

    #[must_use]
    pub const fn is_player2_turn(self) -> bool {
        matches!(self.turn(), Some(Side::Two))
    }

    /// The side whose cards are being beaten this half-cycle.
    #[must_use]
    pub const fn attacker(self) -> Option<Side> {
        match self {
            Phase::Player1Attack | Phase::Player2Defend | Phase::Player1CounterAttack => {
                Some(Side::One)
            }
            Phase::Player2Attack | Phase::Player1Defend | Phase::Player2CounterAttack => {
                Some(Side::Two)
            }
            _ => None,
        }
    }

    #[must_use]
    pub const fn defender(self) -> Option<Side> {
        match self.attacker() {
            Some(side) => Some(side.other()),
            None => None,
        }
    }

    #[must_use]
    pub const fn is_attack(self) -> bool {
        matches!(self, Phase::Player1Attack | Phase::Player2Attack)
    }

    #[must_use]
    pub const fn is_defend(self) -> bool {
        matches!(self, Phase::Player1Defend | Phase::Player2Defend)
    }

    #[must_use]
    pub const fn is_counter_attack(self) -> bool {
        matches!(self, Phase::Player1CounterAttack | Phase::Player2CounterAttack)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Player1Wins | Phase::Player2Wins | Phase::Draw)
    }

    /// Winning side of a result phase. `None` for `Draw` and active phases.
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            Phase::Player1Wins => Some(Side::One),
            Phase::Player2Wins => Some(Side::Two),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Player1Attack => "PLAYER1_ATTACK",
            Phase::Player2Attack => "PLAYER2_ATTACK",
            Phase::Player1Defend => "PLAYER1_DEFEND",
            Phase::Player2Defend => "PLAYER2_DEFEND",
            Phase::Player1CounterAttack => "PLAYER1_COUNTERATTACK",
            Phase::Player2CounterAttack => "PLAYER2_COUNTERATTACK",
            Phase::Player1Wins => "RESULT_PLAYER1_WINNER",
            Phase::Player2Wins => "RESULT_PLAYER2_WINNER",
            Phase::Draw => "RESULT_PLAYERS_DRAW",
        };
        f.write_str(name)
    }
}
