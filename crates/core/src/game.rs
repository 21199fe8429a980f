//! Game session - ties the board, shuffler, move controller and statistics
//!
//! The session is the single owner of mutable puzzle state. Front-ends feed
//! it actions and fixed-timestep ticks, and read it back through `&Board` or
//! an owned [`GameSnapshot`].

use tracing::{debug, info};

use crate::board::Board;
use crate::controller::{MoveController, MovePhase};
use crate::shuffle::ShuffleEngine;
use crate::snapshot::GameSnapshot;
use crate::stats::GameStats;
use crate::types::{Direction, GameAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Solved board, waiting for `start`
    Ready,
    Playing,
    /// The player solved the board; moves are ignored until the next start
    Completed,
}

/// Outcome of a settled move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Moved { number: u8, direction: Direction },
    Completed { time: String, moves: u32 },
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    shuffler: ShuffleEngine,
    controller: MoveController,
    stats: GameStats,
    status: GameStatus,
    /// Number of the tile in flight, reported once it settles.
    moving: Option<u8>,
}

impl Game {
    /// Create a session whose shuffles are reproducible from `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_shuffler(ShuffleEngine::new(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_shuffler(ShuffleEngine::from_entropy())
    }

    fn with_shuffler(shuffler: ShuffleEngine) -> Self {
        let mut board = Board::new();
        board.compute_movable();
        Self {
            board,
            shuffler,
            controller: MoveController::new(),
            stats: GameStats::new(),
            status: GameStatus::Ready,
            moving: None,
        }
    }

    /// Override the animation delay (zero settles on the next tick)
    pub fn with_animation_ms(mut self, animation_ms: u32) -> Self {
        self.controller = MoveController::with_animation_ms(animation_ms);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn controller(&self) -> &MoveController {
        &self.controller
    }

    pub fn seed(&self) -> u32 {
        self.shuffler.seed()
    }

    pub fn is_complete(&self) -> bool {
        self.board.is_complete()
    }

    /// Shuffle the board and start counting moves and time
    pub fn start(&mut self) {
        self.controller.reset();
        self.moving = None;
        self.shuffler.shuffle(&mut self.board);
        self.stats.reset();
        self.stats.stopwatch_mut().start();
        self.status = GameStatus::Playing;
        info!(seed = self.shuffler.seed(), "game started");
    }

    /// Back to a solved, idle board
    pub fn reset(&mut self) {
        self.controller.reset();
        self.moving = None;
        self.board.init();
        self.board.compute_movable();
        self.stats.reset();
        self.status = GameStatus::Ready;
    }

    /// Apply a front-end action. Returns whether it had an effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Move(dir) => self.trigger(dir),
            GameAction::Select(number) => self.select(number),
            GameAction::Start => {
                self.start();
                true
            }
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Start moving the tile that can slide in `dir`.
    ///
    /// Ignored unless a game is in progress and no move is in flight.
    pub fn trigger(&mut self, dir: Direction) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        if self.controller.trigger(&mut self.board, dir).is_none() {
            return false;
        }
        self.moving = self.board.active_tile().map(|t| t.number());
        self.stats.add_move();
        debug!(direction = dir.as_str(), tile = ?self.moving, "move started");
        true
    }

    /// Select a tile by number and move it if it is movable (click path)
    pub fn select(&mut self, number: u8) -> bool {
        if self.status != GameStatus::Playing || !self.controller.is_idle() {
            return false;
        }
        self.board.select_tile(number);
        let Some(dir) = self.board.selected_tile().and_then(|t| t.able_to_move()) else {
            return false;
        };
        self.trigger(dir)
    }

    /// Advance time by `elapsed_ms`.
    ///
    /// Returns an event when a move settles during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<GameEvent> {
        self.stats.stopwatch_mut().tick(elapsed_ms);

        let ticket = self.controller.tick(&mut self.board, elapsed_ms)?;
        let number = self.moving.take()?;

        if self.board.is_complete() && self.status == GameStatus::Playing {
            self.stats.stopwatch_mut().stop();
            self.status = GameStatus::Completed;
            let time = self.stats.time();
            let moves = self.stats.moves();
            info!(%time, moves, "puzzle completed");
            return Some(GameEvent::Completed { time, moves });
        }

        Some(GameEvent::Moved {
            number,
            direction: ticket.direction,
        })
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cells = *self.board.cells();
        out.status = self.status;
        out.complete = self.board.is_complete();
        out.animating = match self.controller.phase() {
            MovePhase::Idle => None,
            MovePhase::Animating { .. } => self
                .board
                .active_tile()
                .and_then(|t| t.action().map(|a| (t.number(), a))),
        };
        out.moves = self.stats.moves();
        out.elapsed_ms = self.stats.stopwatch().elapsed_ms();
        out.seed = self.shuffler.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MoveAction;

    /// Put the session in a playing state one slide away from solved.
    fn one_move_from_solved() -> Game {
        let mut game = Game::new(1);
        game.start();
        let board = game.board_mut();
        board.init();
        board.compute_movable();
        assert!(board.settle(Direction::Right));
        board.clear_transient();
        board.compute_movable();
        game
    }

    #[test]
    fn test_new_game_is_ready_and_solved() {
        let game = Game::new(5);
        assert_eq!(game.status(), GameStatus::Ready);
        assert!(game.is_complete());
        assert_eq!(game.stats().moves(), 0);
    }

    #[test]
    fn test_moves_ignored_before_start() {
        let mut game = Game::new(5);
        assert!(!game.trigger(Direction::Right));
        assert!(!game.select(15));
        assert!(game.is_complete());
    }

    #[test]
    fn test_start_shuffles_and_runs_stopwatch() {
        let mut game = Game::new(5);
        game.start();
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.board().is_consistent());
        assert!(game.stats().stopwatch().is_running());

        game.tick(1_000);
        assert_eq!(game.stats().time(), "00:01");
    }

    #[test]
    fn test_completing_the_puzzle() {
        let mut game = one_move_from_solved();

        // Tile 15 sits at index 15; sliding it left solves the board.
        assert!(game.trigger(Direction::Left));
        assert_eq!(game.stats().moves(), 1);
        assert_eq!(game.tick(50), None);

        let event = game.tick(50);
        assert!(
            matches!(event, Some(GameEvent::Completed { moves: 1, .. })),
            "unexpected event: {:?}",
            event
        );
        assert_eq!(game.status(), GameStatus::Completed);
        assert!(!game.stats().stopwatch().is_running());

        // Further input is ignored.
        assert!(!game.trigger(Direction::Down));
    }

    #[test]
    fn test_moved_event_reports_tile() {
        let mut game = one_move_from_solved();

        // Tile 11 sits above the empty cell at index 14.
        assert!(game.trigger(Direction::Down));
        assert_eq!(
            game.tick(100),
            Some(GameEvent::Moved {
                number: 11,
                direction: Direction::Down
            })
        );
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_select_moves_movable_tile_only() {
        let mut game = one_move_from_solved();

        assert!(!game.select(1), "tile 1 is not movable");
        assert_eq!(game.stats().moves(), 0);

        assert!(game.select(15));
        let snap = game.snapshot();
        assert_eq!(snap.animating, Some((15, MoveAction::MoveLeft)));
        assert!(!snap.playable());

        // Second selection during the animation is dropped.
        assert!(!game.select(14));
        assert_eq!(game.stats().moves(), 1);
    }

    #[test]
    fn test_reset_mid_animation_discards_move() {
        let mut game = one_move_from_solved();
        assert!(game.trigger(Direction::Left));

        game.reset();
        assert_eq!(game.tick(1_000), None);
        assert!(game.is_complete());
        assert_eq!(game.status(), GameStatus::Ready);
        assert!(game.controller().is_idle());
    }

    #[test]
    fn test_apply_action() {
        let mut game = Game::new(9);
        assert!(game.apply_action(GameAction::Start));
        assert_eq!(game.status(), GameStatus::Playing);

        assert!(game.apply_action(GameAction::Reset));
        assert_eq!(game.status(), GameStatus::Ready);
        assert!(!game.apply_action(GameAction::Move(Direction::Right)));
    }
}
