use serde::{Deserialize, Serialize};

use super::board::Cell;

/// Blue joins the left and right columns, Red joins the top and bottom rows.
///
/// Persisted as the numeric id 1 (Blue) or 2 (Red).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Player {
    Blue,
    Red,
}

/// A numeric player id outside `{1, 2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid player id {0} (expected 1 or 2)")]
pub struct InvalidPlayerId(pub u8);

impl Player {
    pub const ALL: [Player; 2] = [Player::Blue, Player::Red];

    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Blue => Cell::Blue,
            Player::Red => Cell::Red,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Player::Blue => 1,
            Player::Red => 2,
        }
    }

    /// Slot of this player in per-player arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            Player::Blue => 0,
            Player::Red => 1,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Blue => "Blue",
            Player::Red => "Red",
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player.id()
    }
}

impl TryFrom<u8> for Player {
    type Error = InvalidPlayerId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Player::Blue),
            2 => Ok(Player::Red),
            other => Err(InvalidPlayerId(other)),
        }
    }
}
