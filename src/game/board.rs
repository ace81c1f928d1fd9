use std::fmt;

use serde::{Deserialize, Serialize};

use super::disjoint_set::DisjointSetForest;
use super::player::Player;
use crate::error::BoardError;

/// Contents of a single board cell, persisted as 0 (empty), 1 (blue), 2 (red).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    Empty,
    Blue,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid cell value {0} (expected 0, 1 or 2)")]
pub struct InvalidCellValue(pub u8);

impl Cell {
    pub fn value(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Blue => 1,
            Cell::Red => 2,
        }
    }

    /// Owner of the stone in this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Blue => Some(Player::Blue),
            Cell::Red => Some(Player::Red),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Blue => 'B',
            Cell::Red => 'R',
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell.value()
    }
}

impl TryFrom<u8> for Cell {
    type Error = InvalidCellValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Blue),
            2 => Ok(Cell::Red),
            other => Err(InvalidCellValue(other)),
        }
    }
}

/// Which of a player's two edges a sentinel stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left column for Blue, top row for Red.
    Near,
    /// Right column for Blue, bottom row for Red.
    Far,
}

/// Key of the connectivity forests: a real cell or one of a player's edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Cell(usize),
    Edge(Player, Side),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("location {location} is outside the board (0..{cells})")]
    OutOfRange { location: usize, cells: usize },
    #[error("cell {0} is already occupied")]
    Occupied(usize),
    #[error("game is over")]
    GameOver,
}

/// Result of putting a stone on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Rejected; the board is unchanged.
    Invalid(MoveError),
    Accepted,
    /// Accepted, and the stone connected the player's two edges.
    Won,
}

impl Placement {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Placement::Invalid(_))
    }
}

/// Neighbor slots in the order left, right, up-left, up-right, down-left,
/// down-right. `None` marks a slot beyond the board edge.
pub type NeighborSlots = [Option<usize>; 6];

/// A Hex board laid out as a parallelogram: every row is shifted half a cell
/// to the right of the row above it.
///
/// Locations are row-major, `row * columns + column`. Each player has a
/// forest holding only their own stones plus their two edge sentinels.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    occupied: usize,
    forests: [DisjointSetForest<Site>; 2],
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, columns: usize) -> Result<Self, BoardError> {
        if Self::cell_count(rows, columns).is_none() {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }
        Ok(Self::with_dimensions(rows, columns))
    }

    /// Number of cells of a `rows` x `columns` board, or `None` when a side is
    /// zero or the product does not fit in memory.
    pub fn cell_count(rows: usize, columns: usize) -> Option<usize> {
        if rows == 0 || columns == 0 {
            return None;
        }
        rows.checked_mul(columns)
            .filter(|&cells| cells <= isize::MAX as usize)
    }

    /// Empty board with the same dimensions as this one.
    pub fn cleared(&self) -> Board {
        Self::with_dimensions(self.rows, self.columns)
    }

    fn with_dimensions(rows: usize, columns: usize) -> Self {
        let forests = Player::ALL.map(|player| {
            let mut forest = DisjointSetForest::new();
            forest.create(Site::Edge(player, Side::Near));
            forest.create(Site::Edge(player, Side::Far));
            forest
        });
        Board {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
            occupied: 0,
            forests,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Get the cell at a specific position
    /// Row 0 is the top row
    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row * self.columns + column]
    }

    pub fn cell(&self, location: usize) -> Option<Cell> {
        self.cells.get(location).copied()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Owned copy of the cells, used as observation and state snapshot.
    pub fn snapshot(&self) -> Vec<Cell> {
        self.cells.clone()
    }

    /// Cells in their numeric form.
    pub fn values(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.value()).collect()
    }

    pub fn location(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }

    pub fn coordinates(&self, location: usize) -> Option<(usize, usize)> {
        (location < self.size()).then(|| (location / self.columns, location % self.columns))
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.occupied == self.cells.len()
    }

    pub fn empty_locations(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(location, _)| location)
            .collect()
    }

    /// Neighbor slots of `location`; all `None` when it is off the board.
    pub fn neighbor_slots(&self, location: usize) -> NeighborSlots {
        let mut slots = [None; 6];
        let Some((row, column)) = self.coordinates(location) else {
            return slots;
        };
        let left = column > 0;
        let right = column + 1 < self.columns;
        let up = row > 0;
        let down = row + 1 < self.rows;

        if left {
            slots[0] = Some(location - 1);
        }
        if right {
            slots[1] = Some(location + 1);
        }
        if up {
            slots[2] = Some(location - self.columns);
            if right {
                slots[3] = Some(location - self.columns + 1);
            }
        }
        if down {
            if left {
                slots[4] = Some(location + self.columns - 1);
            }
            slots[5] = Some(location + self.columns);
        }
        slots
    }

    /// On-board neighbors of `location`, at most six.
    pub fn neighbors(&self, location: usize) -> impl Iterator<Item = usize> {
        self.neighbor_slots(location).into_iter().flatten()
    }

    /// Put a stone for `player` on `location` and report whether it won.
    pub fn place(&mut self, location: usize, player: Player) -> Placement {
        match self.cell(location) {
            None => {
                return Placement::Invalid(MoveError::OutOfRange {
                    location,
                    cells: self.size(),
                })
            }
            Some(Cell::Empty) => {}
            Some(_) => return Placement::Invalid(MoveError::Occupied(location)),
        }

        self.cells[location] = player.to_cell();
        self.occupied += 1;

        let site = Site::Cell(location);
        let friendly: Vec<usize> = self
            .neighbors(location)
            .filter(|&n| self.cells[n].owner() == Some(player))
            .collect();
        let edges = self.touched_edges(location, player);

        let forest = &mut self.forests[player.index()];
        forest.create(site);
        for neighbor in friendly {
            forest.union(site, Site::Cell(neighbor));
        }
        for side in edges.into_iter().flatten() {
            forest.union(Site::Edge(player, side), site);
        }

        // Compressing finds keep the sentinels next to their roots.
        let near = forest.find(&Site::Edge(player, Side::Near));
        let far = forest.find(&Site::Edge(player, Side::Far));
        if near.is_some() && near == far {
            Placement::Won
        } else {
            Placement::Accepted
        }
    }

    /// True once `player`'s stones join both of their edges.
    pub fn has_connection(&self, player: Player) -> bool {
        self.forests[player.index()].connected(
            &Site::Edge(player, Side::Near),
            &Site::Edge(player, Side::Far),
        )
    }

    /// Edges of `player` that `location` lies on. A cell can touch both when
    /// the board is a single row or column wide.
    fn touched_edges(&self, location: usize, player: Player) -> [Option<Side>; 2] {
        let (row, column) = (location / self.columns, location % self.columns);
        let (near, far) = match player {
            Player::Blue => (column == 0, column + 1 == self.columns),
            Player::Red => (row == 0, row + 1 == self.rows),
        };
        [near.then_some(Side::Near), far.then_some(Side::Far)]
    }

    #[cfg(test)]
    pub(crate) fn forest(&self, player: Player) -> &DisjointSetForest<Site> {
        &self.forests[player.index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            write!(f, "{}", " ".repeat(row))?;
            let line: Vec<String> = (0..self.columns)
                .map(|column| self.get(row, column).symbol().to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: usize, columns: usize) -> Board {
        Board::new(rows, columns).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = board(3, 4);
        for row in 0..3 {
            for column in 0..4 {
                assert_eq!(board.get(row, column), Cell::Empty);
            }
        }
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.empty_locations().len(), 12);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Board::new(0, 5).unwrap_err(),
            BoardError::InvalidDimensions { rows: 0, columns: 5 }
        );
        assert!(Board::new(5, 0).is_err());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_eq!(
            Board::new(usize::MAX, 2).unwrap_err(),
            BoardError::InvalidDimensions {
                rows: usize::MAX,
                columns: 2
            }
        );
        assert!(Board::new(1 << 40, 1 << 40).is_err());
        assert!(Board::new(usize::MAX, 1).is_err());
        assert_eq!(Board::cell_count(usize::MAX, 2), None);
        assert_eq!(Board::cell_count(0, 4), None);
        assert_eq!(Board::cell_count(11, 11), Some(121));
    }

    #[test]
    fn test_interior_neighbors() {
        // 0 1 2
        //  3 4 5
        //   6 7 8
        let board = board(3, 3);
        assert_eq!(
            board.neighbor_slots(4),
            [Some(3), Some(5), Some(1), Some(2), Some(6), Some(7)]
        );
    }

    #[test]
    fn test_corner_neighbors() {
        let board = board(3, 3);
        let mut top_left: Vec<usize> = board.neighbors(0).collect();
        top_left.sort();
        assert_eq!(top_left, vec![1, 3]);

        let mut top_right: Vec<usize> = board.neighbors(2).collect();
        top_right.sort();
        assert_eq!(top_right, vec![1, 4, 5]);

        let mut bottom_left: Vec<usize> = board.neighbors(6).collect();
        bottom_left.sort();
        assert_eq!(bottom_left, vec![3, 4, 7]);

        let mut bottom_right: Vec<usize> = board.neighbors(8).collect();
        bottom_right.sort();
        assert_eq!(bottom_right, vec![5, 7]);
    }

    #[test]
    fn test_left_column_has_no_left_neighbor() {
        let board = board(4, 5);
        for row in 0..4 {
            let slots = board.neighbor_slots(row * 5);
            assert_eq!(slots[0], None);
            assert_eq!(slots[4], None);
        }
    }

    #[test]
    fn test_neighbors_are_symmetric() {
        let board = board(4, 6);
        for location in 0..board.size() {
            for neighbor in board.neighbors(location) {
                assert!(
                    board.neighbors(neighbor).any(|n| n == location),
                    "{} lists {} but not the reverse",
                    location,
                    neighbor
                );
            }
        }
    }

    #[test]
    fn test_off_board_has_no_neighbors() {
        let board = board(2, 2);
        assert_eq!(board.neighbors(4).count(), 0);
    }

    #[test]
    fn test_place_out_of_range() {
        let mut board = board(3, 3);
        assert_eq!(
            board.place(9, Player::Blue),
            Placement::Invalid(MoveError::OutOfRange { location: 9, cells: 9 })
        );
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_place_occupied() {
        let mut board = board(3, 3);
        assert_eq!(board.place(4, Player::Blue), Placement::Accepted);
        assert_eq!(
            board.place(4, Player::Red),
            Placement::Invalid(MoveError::Occupied(4))
        );
        assert_eq!(board.cell(4), Some(Cell::Blue));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_blue_diagonal_wins_on_last_stone() {
        let mut board = board(3, 3);
        assert_eq!(board.place(6, Player::Blue), Placement::Accepted);
        assert_eq!(board.place(4, Player::Blue), Placement::Accepted);
        assert_eq!(board.place(2, Player::Blue), Placement::Won);
    }

    #[test]
    fn test_red_column_wins_top_to_bottom() {
        let mut board = board(3, 3);
        assert_eq!(board.place(0, Player::Red), Placement::Accepted);
        assert_eq!(board.place(3, Player::Red), Placement::Accepted);
        assert_eq!(board.place(6, Player::Red), Placement::Won);
        assert!(!board.has_connection(Player::Blue));
    }

    #[test]
    fn test_blue_column_does_not_win() {
        // Top-to-bottom is Red's direction, not Blue's.
        let mut board = board(3, 3);
        for location in [0, 3, 6] {
            assert_eq!(board.place(location, Player::Blue), Placement::Accepted);
        }
        assert!(!board.has_connection(Player::Blue));
    }

    #[test]
    fn test_non_adjacent_diagonal_does_not_connect() {
        // 3 touches 1, but 1 and 5 are not neighbors; 4 closes the chain.
        let mut board = board(3, 3);
        assert_eq!(board.place(3, Player::Blue), Placement::Accepted);
        assert_eq!(board.place(1, Player::Blue), Placement::Accepted);
        assert_eq!(board.place(5, Player::Blue), Placement::Accepted);
        assert!(!board.has_connection(Player::Blue));
        assert_eq!(board.place(4, Player::Blue), Placement::Won);
    }

    #[test]
    fn test_single_cell_board_wins_immediately() {
        for player in Player::ALL {
            let mut board = board(1, 1);
            assert_eq!(board.place(0, player), Placement::Won);
        }
    }

    #[test]
    fn test_single_row_blue_needs_full_row() {
        let mut board = board(1, 4);
        assert_eq!(board.place(0, Player::Blue), Placement::Accepted);
        assert_eq!(board.place(1, Player::Blue), Placement::Accepted);
        assert_eq!(board.place(3, Player::Blue), Placement::Accepted);
        assert_eq!(board.place(2, Player::Blue), Placement::Won);
    }

    #[test]
    fn test_single_row_red_wins_anywhere() {
        let mut board = board(1, 4);
        assert_eq!(board.place(2, Player::Red), Placement::Won);
    }

    #[test]
    fn test_sentinels_stay_next_to_their_roots() {
        use rand::rngs::StdRng;
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let mut board = board(8, 8);
        let mut locations: Vec<usize> = (0..64).collect();
        locations.shuffle(&mut StdRng::seed_from_u64(5));
        let mut player = Player::Blue;
        for location in locations {
            board.place(location, player);
            for p in Player::ALL {
                for side in [Side::Near, Side::Far] {
                    let depth = board.forest(p).depth(&Site::Edge(p, side));
                    assert!(depth <= Some(1), "{:?} {:?} at depth {:?}", p, side, depth);
                }
            }
            player = player.other();
        }
    }

    #[test]
    fn test_forests_never_mix_players() {
        let mut board = board(3, 3);
        board.place(4, Player::Blue);
        board.place(3, Player::Red);
        board.place(5, Player::Red);
        let blue = board.forest(Player::Blue);
        assert!(blue.contains(&Site::Cell(4)));
        assert!(!blue.contains(&Site::Cell(3)));
        assert!(!blue.contains(&Site::Edge(Player::Red, Side::Near)));
        let red = board.forest(Player::Red);
        assert!(!red.contains(&Site::Cell(4)));
        assert!(!red.connected(&Site::Cell(3), &Site::Cell(5)));
    }

    #[test]
    fn test_full_board_has_exactly_one_connection() {
        // Checkerboard-ish fill of a 4x4 board, placed without turn order.
        let mut board = board(4, 4);
        for location in 0..16 {
            let player = if (location / 4 + location) % 2 == 0 {
                Player::Blue
            } else {
                Player::Red
            };
            assert!(!board.place(location, player).is_invalid());
        }
        assert!(board.is_full());
        assert!(board.has_connection(Player::Blue) ^ board.has_connection(Player::Red));
    }

    #[test]
    fn test_snapshot_and_values() {
        let mut board = board(2, 2);
        board.place(1, Player::Blue);
        board.place(2, Player::Red);
        assert_eq!(
            board.snapshot(),
            vec![Cell::Empty, Cell::Blue, Cell::Red, Cell::Empty]
        );
        assert_eq!(board.values(), vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_cell_value_roundtrip() {
        for value in 0..3u8 {
            assert_eq!(Cell::try_from(value).unwrap().value(), value);
        }
        assert_eq!(Cell::try_from(3), Err(InvalidCellValue(3)));
    }

    #[test]
    fn test_display_indents_rows() {
        let mut board = board(2, 3);
        board.place(0, Player::Blue);
        board.place(5, Player::Red);
        assert_eq!(board.to_string(), "B . .\n . . R\n");
    }

    #[test]
    fn test_cleared_board_forgets_stones() {
        let mut board = board(2, 3);
        board.place(0, Player::Blue);
        board.place(1, Player::Blue);
        board.place(2, Player::Blue);
        assert!(board.has_connection(Player::Blue));

        let cleared = board.cleared();
        assert_eq!(cleared.rows(), 2);
        assert_eq!(cleared.columns(), 3);
        assert_eq!(cleared.occupied_count(), 0);
        assert!(!cleared.has_connection(Player::Blue));
    }

    #[test]
    fn test_location_and_coordinates() {
        let board = board(3, 4);
        assert_eq!(board.location(2, 1), Some(9));
        assert_eq!(board.location(3, 0), None);
        assert_eq!(board.coordinates(9), Some((2, 1)));
        assert_eq!(board.coordinates(12), None);
    }
}
