//! Snapshot of a hypothetical position.

use serde::{Deserialize, Serialize};

use crate::cards::Hand;
use crate::core::Player;
use crate::game::Game;
use crate::rules::Table;

/// Table plus both players, from the point of view of the side to act.
///
/// `player` is whoever decides at this point; `opponent` is the other seat.
/// Cloning is cheap: every container underneath is persistent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub table: Table,
    pub player: Player,
    pub opponent: Player,
}

impl State {
    #[must_use]
    pub fn new(table: Table, player: Player, opponent: Player) -> Self {
        Self { table, player, opponent }
    }

    /// Capture the live game with the side to act as `player`.
    #[must_use]
    pub fn from_game(game: &Game) -> Self {
        let (player, opponent) = if game.phase().is_player2_turn() {
            (game.player2(), game.player1())
        } else {
            (game.player1(), game.player2())
        };
        Self::new(game.table().clone(), player.clone(), opponent.clone())
    }

    /// Same position with the roles swapped.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self::new(self.table.clone(), self.opponent.clone(), self.player.clone())
    }

    /// The player in this snapshot named `name`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Player> {
        if self.player.name() == name {
            Some(&self.player)
        } else if self.opponent.name() == name {
            Some(&self.opponent)
        } else {
            None
        }
    }

    fn hand_of(&self, name: &str) -> Option<&Hand> {
        self.resolve(name).map(|player| &player.hand)
    }

    /// Whether the live game is in exactly this position: same table and the
    /// same hand for each named player.
    #[must_use]
    pub fn matches(&self, game: &Game) -> bool {
        self.table == *game.table()
            && self.hand_of(game.player1().name()) == Some(&game.player1().hand)
            && self.hand_of(game.player2().name()) == Some(&game.player2().hand)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "State(board={}; player={}; opponent={})",
            self.table.board().len(),
            self.player,
            self.opponent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::DeckKind;
    use crate::core::GameConfig;
    use crate::rules::Phase;

    fn game(phase: Phase) -> Game {
        let config = GameConfig::new()
            .with_deck(DeckKind::Mini)
            .with_hand_slots(3)
            .with_starting_phase(phase);
        Game::new(config, Player::passive("alice"), Player::ai("bot"))
    }

    #[test]
    fn test_from_game_puts_turn_holder_first() {
        let state = State::from_game(&game(Phase::Player2Attack));
        assert_eq!(state.player.name(), "bot");
        assert_eq!(state.opponent.name(), "alice");

        let state = State::from_game(&game(Phase::Player1Attack));
        assert_eq!(state.player.name(), "alice");
    }

    #[test]
    fn test_matches_ignores_role_order() {
        let live = game(Phase::Player1Attack);
        let state = State::from_game(&live);

        assert!(state.matches(&live));
        assert!(state.swapped().matches(&live));
    }

    #[test]
    fn test_mismatch_on_hand_change() {
        let live = game(Phase::Player1Attack);
        let mut state = State::from_game(&live);
        let card = state.player.hand.get(0).unwrap();
        state.player.hand.play(&[card]);

        assert!(!state.matches(&live));
    }

    #[test]
    fn test_resolve_by_name() {
        let state = State::from_game(&game(Phase::Player1Attack));
        assert_eq!(state.resolve("bot").map(Player::name), Some("bot"));
        assert!(state.resolve("nobody").is_none());
    }
}
