use serde::{Deserialize, Serialize};

use super::{Board, Cell, MoveError, Placement, Player};
use crate::error::BoardError;

/// Immutable copy of a match at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub cells: Vec<Cell>,
    pub rows: usize,
    pub columns: usize,
    /// Player to move next.
    pub turn: Player,
    pub moves: usize,
    pub winner: Option<Player>,
    pub last_move_valid: bool,
}

impl GameState {
    pub fn is_full(&self) -> bool {
        self.moves == self.cells.len()
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    /// Winner in numeric form: 0 for none, otherwise the player id.
    pub fn numeric_winner(&self) -> u8 {
        self.winner.map_or(0, Player::id)
    }

    pub fn legal_actions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(location, _)| location)
            .collect()
    }
}

/// Turn and move bookkeeping on top of a [`Board`].
#[derive(Debug, Clone)]
pub struct Match {
    board: Board,
    current_player: Player,
    moves: usize,
    winner: Option<Player>,
    last_move_valid: bool,
}

impl Match {
    pub fn new(rows: usize, columns: usize, first: Player) -> Result<Self, BoardError> {
        Ok(Match {
            board: Board::new(rows, columns)?,
            current_player: first,
            moves: 0,
            winner: None,
            last_move_valid: true,
        })
    }

    /// A new match on an empty board of the same size.
    pub fn rematch(&self, first: Player) -> Match {
        Match {
            board: self.board.cleared(),
            current_player: first,
            moves: 0,
            winner: None,
            last_move_valid: true,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn last_move_valid(&self) -> bool {
        self.last_move_valid
    }

    pub fn is_full(&self) -> bool {
        self.board.is_full()
    }

    /// Full board without a winner. Hex cannot end this way, so this only
    /// guards against a broken board.
    pub fn is_draw(&self) -> bool {
        self.moves == self.board.size() && self.winner.is_none()
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    /// Empty cells, in location order.
    pub fn legal_actions(&self) -> Vec<usize> {
        self.board.empty_locations()
    }

    /// Place a stone for the current player.
    ///
    /// The turn passes and the move counter grows only when the stone is
    /// accepted. After a win every attempt is rejected.
    pub fn attempt(&mut self, location: usize) -> Placement {
        let placement = if self.winner.is_some() {
            Placement::Invalid(MoveError::GameOver)
        } else {
            self.board.place(location, self.current_player)
        };

        self.last_move_valid = !placement.is_invalid();
        if self.last_move_valid {
            if placement == Placement::Won {
                self.winner = Some(self.current_player);
            }
            self.moves += 1;
            self.current_player = self.current_player.other();
        }
        placement
    }

    pub fn snapshot(&self) -> GameState {
        GameState {
            cells: self.board.snapshot(),
            rows: self.board.rows(),
            columns: self.board.columns(),
            turn: self.current_player,
            moves: self.moves,
            winner: self.winner,
            last_move_valid: self.last_move_valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_match() {
        let game = Match::new(3, 3, Player::Red).unwrap();
        assert_eq!(game.current_player(), Player::Red);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.winner(), None);
        assert_eq!(game.legal_actions().len(), 9);
        assert!(!game.is_draw());
    }

    #[test]
    fn test_attempt_alternates_turns() {
        let mut game = Match::new(3, 3, Player::Blue).unwrap();
        assert_eq!(game.attempt(4), Placement::Accepted);
        assert_eq!(game.current_player(), Player::Red);
        assert_eq!(game.attempt(0), Placement::Accepted);
        assert_eq!(game.current_player(), Player::Blue);
        assert_eq!(game.moves(), 2);
        assert_eq!(game.board().cell(4), Some(Cell::Blue));
        assert_eq!(game.board().cell(0), Some(Cell::Red));
    }

    #[test]
    fn test_invalid_attempt_keeps_turn() {
        let mut game = Match::new(3, 3, Player::Blue).unwrap();
        game.attempt(4);
        assert_eq!(
            game.attempt(4),
            Placement::Invalid(MoveError::Occupied(4))
        );
        assert_eq!(game.current_player(), Player::Red);
        assert_eq!(game.moves(), 1);
        assert!(!game.last_move_valid());

        assert!(game.attempt(42).is_invalid());
        assert_eq!(game.current_player(), Player::Red);
        assert_eq!(game.moves(), 1);

        assert_eq!(game.attempt(5), Placement::Accepted);
        assert!(game.last_move_valid());
    }

    #[test]
    fn test_win_detection() {
        // Blue 6, 4, 2 joins left to right; Red plays the top-left corner area.
        let mut game = Match::new(3, 3, Player::Blue).unwrap();
        for (location, expected) in [
            (6, Placement::Accepted),
            (0, Placement::Accepted),
            (4, Placement::Accepted),
            (1, Placement::Accepted),
        ] {
            assert_eq!(game.attempt(location), expected);
            assert_eq!(game.winner(), None);
        }
        assert_eq!(game.attempt(2), Placement::Won);
        assert_eq!(game.winner(), Some(Player::Blue));
        assert_eq!(game.snapshot().numeric_winner(), 1);
    }

    #[test]
    fn test_win_is_final() {
        let mut game = Match::new(1, 1, Player::Red).unwrap();
        assert_eq!(game.attempt(0), Placement::Won);
        assert_eq!(game.winner(), Some(Player::Red));
        assert_eq!(game.attempt(0), Placement::Invalid(MoveError::GameOver));
        assert_eq!(game.winner(), Some(Player::Red));
        assert_eq!(game.moves(), 1);
        assert!(!game.is_draw());
    }

    #[test]
    fn test_moves_match_occupied_cells() {
        let mut game = Match::new(4, 4, Player::Blue).unwrap();
        for location in [0, 0, 5, 17, 10, 5, 15] {
            game.attempt(location);
            assert_eq!(game.moves(), game.board().occupied_count());
        }
    }

    #[test]
    fn test_rematch_starts_over() {
        let mut game = Match::new(1, 1, Player::Blue).unwrap();
        game.attempt(0);
        let next = game.rematch(Player::Red);
        assert_eq!(next.current_player(), Player::Red);
        assert_eq!(next.moves(), 0);
        assert_eq!(next.winner(), None);
        assert_eq!(next.legal_actions(), vec![0]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut game = Match::new(2, 2, Player::Blue).unwrap();
        let before = game.snapshot();
        game.attempt(0);
        assert_eq!(before.cells[0], Cell::Empty);
        assert_eq!(before.turn, Player::Blue);
        let after = game.snapshot();
        assert_eq!(after.cells[0], Cell::Blue);
        assert_eq!(after.turn, Player::Red);
        assert_eq!(after.legal_actions(), vec![1, 2, 3]);
    }
}
