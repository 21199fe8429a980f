use crate::board::Cell;
use crate::game::GameStatus;
use crate::stats::format_time;
use crate::types::{MoveAction, CELL_COUNT};

/// Owned, read-only copy of the game state for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub cells: [Cell; CELL_COUNT],
    pub status: GameStatus,
    pub complete: bool,
    /// Animation tag of the tile in flight
    pub animating: Option<(u8, MoveAction)>,
    pub moves: u32,
    pub elapsed_ms: u64,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Elapsed time as `mm:ss`
    pub fn time(&self) -> String {
        format_time(self.elapsed_ms)
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing && self.animating.is_none()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [None; CELL_COUNT],
            status: GameStatus::Ready,
            complete: false,
            animating: None,
            moves: 0,
            elapsed_ms: 0,
            seed: 0,
        }
    }
}
