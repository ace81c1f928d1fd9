//! Core Hex game logic: union-find connectivity, board with incremental win
//! detection, player types, and match bookkeeping.

mod board;
mod disjoint_set;
mod player;
mod state;

pub use board::{Board, Cell, InvalidCellValue, MoveError, NeighborSlots, Placement, Side, Site};
pub use disjoint_set::DisjointSetForest;
pub use player::{InvalidPlayerId, Player};
pub use state::{GameState, Match};
