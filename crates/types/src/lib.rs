//! Shared types and constants for the 15-puzzle workspace.
//!
//! Everything here is plain data with no external dependencies, so it can be
//! used by the board logic, the input translators, the ranking store and the
//! terminal front-end alike.
//!
//! # Board Dimensions
//!
//! The puzzle is always a 4x4 grid stored row-major:
//!
//! ```text
//!  0  1  2  3
//!  4  5  6  7
//!  8  9 10 11
//! 12 13 14 15
//! ```
//!
//! Tiles are numbered 1..=15; the solved board has the empty cell at index 15.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `MOVE_ANIMATION_MS` | 100 | Delay between a move starting and the board settling |
//!
//! # Examples
//!
//! ```
//! use puzzle15_types::{Direction, MoveAction, GRID_WIDTH, CELL_COUNT};
//!
//! let dir = Direction::from_str("down").unwrap();
//! assert_eq!(dir, Direction::Down);
//! assert_eq!(dir.move_action(), MoveAction::MoveDown);
//! assert_eq!(MoveAction::MoveDown.as_str(), "move-down");
//!
//! assert_eq!(GRID_WIDTH, 4);
//! assert_eq!(CELL_COUNT, 16);
//! ```

/// Grid width in cells (4 columns)
pub const GRID_WIDTH: usize = 4;

/// Total number of cells on the board (4x4)
pub const CELL_COUNT: usize = GRID_WIDTH * GRID_WIDTH;

/// Number of numbered tiles (every cell except the empty one)
pub const TILE_COUNT: u8 = (CELL_COUNT - 1) as u8;

/// Number of random slides performed by a shuffle
pub const SHUFFLE_STEPS: u32 = 300;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Time a tile spends animating before the board settles
pub const MOVE_ANIMATION_MS: u32 = 100;

/// Analog stick magnitude below which an axis is ignored
pub const AXES_DEADZONE: f64 = 0.6;

/// Storage key for the persisted ranking
pub const RANKING_KEY: &str = "ranking";

/// Number of entries kept in the ranking
pub const RANKING_LIMIT: usize = 5;

/// Direction a tile can slide in, pointing at the adjacent empty cell.
///
/// The same type carries directional intents coming from the keyboard or a
/// gamepad: an intent of `Left` moves the tile whose empty neighbour is on
/// its left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Left,
    Right,
    Down,
}

impl Direction {
    /// All directions in neighbour inspection order.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// Parse a direction (case-insensitive). `"up"` is accepted for `Top`.
    ///
    /// # Examples
    ///
    /// ```
    /// use puzzle15_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("TOP"), Some(Direction::Top));
    /// assert_eq!(Direction::from_str("up"), Some(Direction::Top));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top" | "up" => Some(Direction::Top),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }

    /// The animation tag for a tile sliding in this direction.
    pub fn move_action(&self) -> MoveAction {
        match self {
            Direction::Top => MoveAction::MoveTop,
            Direction::Left => MoveAction::MoveLeft,
            Direction::Right => MoveAction::MoveRight,
            Direction::Down => MoveAction::MoveDown,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Top => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Top,
        }
    }
}

/// The move a tile is currently animating.
///
/// The presentation layer uses the tag to drive its transition; the engine
/// only uses it to find the tile that is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAction {
    MoveTop,
    MoveLeft,
    MoveRight,
    MoveDown,
}

impl MoveAction {
    /// Convert to the kebab-case tag used by presentation layers
    ///
    /// # Examples
    ///
    /// ```
    /// use puzzle15_types::MoveAction;
    ///
    /// assert_eq!(MoveAction::MoveLeft.as_str(), "move-left");
    /// assert_eq!(MoveAction::MoveTop.as_str(), "move-top");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveAction::MoveTop => "move-top",
            MoveAction::MoveLeft => "move-left",
            MoveAction::MoveRight => "move-right",
            MoveAction::MoveDown => "move-down",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            MoveAction::MoveTop => Direction::Top,
            MoveAction::MoveLeft => Direction::Left,
            MoveAction::MoveRight => Direction::Right,
            MoveAction::MoveDown => Direction::Down,
        }
    }
}

/// Game actions produced by front-end input (keyboard, gamepad, clicks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide the tile that can move in this direction
    Move(Direction),
    /// Slide the tile with this number, if it is movable
    Select(u8),
    /// Shuffle and start a new game
    Start,
    /// Return to the solved board without playing
    Reset,
}
