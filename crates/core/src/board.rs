//! Board module - the 4x4 tile grid
//!
//! The board is a flat row-major array of 16 cells. Each cell holds a numbered
//! [`Tile`] or is empty (`None`). Exactly one cell is empty whenever the board
//! is settled, and the tile numbers are always a permutation of 1..=15.
//!
//! Tiles carry transient flags recomputed around every move:
//!
//! - `able_to_move`: direction of the adjacent empty cell, if any
//! - `selected`: UI selection flag, only ever set on a movable tile
//! - `action`: animation tag of the move in flight

use std::fmt::{self, Display, Formatter};

use arrayvec::ArrayVec;

use crate::types::{Direction, MoveAction, CELL_COUNT, GRID_WIDTH, TILE_COUNT};

/// A numbered puzzle tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    number: u8,
    able_to_move: Option<Direction>,
    selected: bool,
    action: Option<MoveAction>,
}

impl Tile {
    /// Create a tile with all transient flags cleared
    pub fn new(number: u8) -> Self {
        Self {
            number,
            able_to_move: None,
            selected: false,
            action: None,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn able_to_move(&self) -> Option<Direction> {
        self.able_to_move
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn action(&self) -> Option<MoveAction> {
        self.action
    }

    fn clear_transient(&mut self) {
        self.able_to_move = None;
        self.selected = false;
        self.action = None;
    }
}

/// A cell on the board
///
/// - `None`: the empty cell
/// - `Some(Tile)`: a numbered tile
pub type Cell = Option<Tile>;

/// Index of the neighbour of `index` in `dir`, or `None` for a wall.
///
/// # Examples
///
/// ```
/// use puzzle15_core::board::neighbor;
/// use puzzle15_core::types::Direction;
///
/// assert_eq!(neighbor(5, Direction::Top), Some(1));
/// assert_eq!(neighbor(3, Direction::Right), None);
/// assert_eq!(neighbor(12, Direction::Down), None);
/// ```
pub fn neighbor(index: usize, dir: Direction) -> Option<usize> {
    if index >= CELL_COUNT {
        return None;
    }
    match dir {
        Direction::Top => index.checked_sub(GRID_WIDTH),
        Direction::Down => {
            let below = index + GRID_WIDTH;
            (below < CELL_COUNT).then_some(below)
        }
        Direction::Left => (index % GRID_WIDTH != 0).then(|| index - 1),
        Direction::Right => (index % GRID_WIDTH != GRID_WIDTH - 1).then_some(index + 1),
    }
}

/// The puzzle board - 16 cells in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a solved board: `[1, 2, ..., 15, empty]`
    pub fn new() -> Self {
        Self {
            cells: Self::solved_cells(),
        }
    }

    /// Build a board from tile numbers in index order (`None` = empty).
    ///
    /// Returns `None` unless the numbers are exactly 1..=15 plus one empty.
    pub fn from_numbers(numbers: [Option<u8>; CELL_COUNT]) -> Option<Self> {
        let mut seen = [false; CELL_COUNT];
        let mut empties = 0;
        for n in numbers {
            match n {
                None => empties += 1,
                Some(n) if (1..=TILE_COUNT).contains(&n) && !seen[n as usize] => {
                    seen[n as usize] = true;
                }
                Some(_) => return None,
            }
        }
        if empties != 1 {
            return None;
        }
        Some(Self {
            cells: numbers.map(|n| n.map(Tile::new)),
        })
    }

    fn solved_cells() -> [Cell; CELL_COUNT] {
        std::array::from_fn(|i| {
            if i < CELL_COUNT - 1 {
                Some(Tile::new((i + 1) as u8))
            } else {
                None
            }
        })
    }

    /// Reset to the solved order, dropping all transient flags
    pub fn init(&mut self) {
        self.cells = Self::solved_cells();
    }

    /// Read-only view of the cells
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Get cell at `index`, `None` if out of bounds
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Tile numbers in index order, `None` for the empty cell
    pub fn numbers(&self) -> [Option<u8>; CELL_COUNT] {
        self.cells.map(|c| c.map(|t| t.number))
    }

    pub fn empty_index(&self) -> Option<usize> {
        self.cells.iter().position(|c| c.is_none())
    }

    /// Index of the tile with `number`
    pub fn position_of(&self, number: u8) -> Option<usize> {
        self.cells
            .iter()
            .position(|c| matches!(c, Some(t) if t.number == number))
    }

    pub fn tile(&self, number: u8) -> Option<Tile> {
        self.position_of(number).and_then(|i| self.cells[i])
    }

    /// Whether the board holds exactly the tiles 1..=15 and one empty cell
    pub fn is_consistent(&self) -> bool {
        Self::from_numbers(self.numbers()).is_some()
    }

    /// Check if the board is in solved order
    pub fn is_complete(&self) -> bool {
        self.cells
            .iter()
            .zip(Self::solved_cells().iter())
            .all(|(a, b)| a.map(|t| t.number) == b.map(|t| t.number))
    }

    /// Recompute `able_to_move` for every tile.
    ///
    /// A tile is movable toward its empty neighbour; all other tiles get `None`.
    pub fn compute_movable(&mut self) {
        for tile in self.cells.iter_mut().flatten() {
            tile.able_to_move = None;
        }
        let Some(empty) = self.empty_index() else {
            return;
        };
        // The tile on the empty cell's `dir` side slides back the other way.
        for dir in Direction::ALL {
            let Some(idx) = neighbor(empty, dir) else {
                continue;
            };
            if let Some(tile) = self.cells[idx].as_mut() {
                tile.able_to_move = Some(dir.opposite());
            }
        }
    }

    /// Movable tiles as `(number, direction)` in index order.
    ///
    /// At most four tiles border the empty cell.
    pub fn movable(&self) -> ArrayVec<(u8, Direction), 4> {
        let mut out = ArrayVec::new();
        for tile in self.cells.iter().flatten() {
            if let Some(dir) = tile.able_to_move {
                let _ = out.try_push((tile.number, dir));
            }
        }
        out
    }

    /// Directions with a movable tile, in index order
    pub fn movable_directions(&self) -> ArrayVec<Direction, 4> {
        self.movable().into_iter().map(|(_, dir)| dir).collect()
    }

    /// Mark the tile with `number` as selected if it is movable.
    ///
    /// Every other tile is deselected. A non-movable or unknown number leaves
    /// nothing selected.
    pub fn select_tile(&mut self, number: u8) {
        for tile in self.cells.iter_mut().flatten() {
            tile.selected = tile.number == number && tile.able_to_move.is_some();
        }
    }

    pub fn selected_tile(&self) -> Option<Tile> {
        self.cells
            .iter()
            .flatten()
            .find(|t| t.selected && t.able_to_move.is_some())
            .copied()
    }

    pub fn has_selected(&self) -> bool {
        self.cells.iter().flatten().any(|t| t.selected)
    }

    /// The tile currently animating, if any
    pub fn active_tile(&self) -> Option<Tile> {
        self.cells.iter().flatten().find(|t| t.action.is_some()).copied()
    }

    /// Clear `able_to_move`, `selected` and `action` on every tile
    pub fn clear_transient(&mut self) {
        for tile in self.cells.iter_mut().flatten() {
            tile.clear_transient();
        }
    }

    /// Start a move: select the tile movable in `dir` and tag its action.
    ///
    /// Returns false if no tile can move in `dir`.
    pub fn begin_move(&mut self, dir: Direction) -> bool {
        let Some(tile) = self
            .cells
            .iter_mut()
            .flatten()
            .find(|t| t.able_to_move == Some(dir))
        else {
            return false;
        };
        tile.selected = true;
        tile.action = Some(dir.move_action());
        true
    }

    /// Swap the tile movable in `dir` with the empty cell.
    ///
    /// The moved tile's transient flags are cleared. Returns false (and
    /// leaves the board untouched) if no tile can move in `dir`.
    pub fn settle(&mut self, dir: Direction) -> bool {
        let Some(from) = self
            .cells
            .iter()
            .position(|c| matches!(c, Some(t) if t.able_to_move == Some(dir)))
        else {
            return false;
        };
        let Some(to) = neighbor(from, dir) else {
            return false;
        };
        if self.cells[to].is_some() {
            return false;
        }
        self.cells.swap(from, to);
        if let Some(tile) = self.cells[to].as_mut() {
            tile.clear_transient();
        }
        true
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(GRID_WIDTH) {
            for cell in row {
                match cell {
                    Some(tile) => write!(f, "{:>2} ", tile.number)?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
