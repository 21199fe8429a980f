//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains the 15-puzzle rules and state machines. It has no
//! dependency on rendering, terminals, storage or input devices, making it:
//!
//! - **Deterministic**: the same seed produces the same scramble
//! - **Testable**: every rule is covered by unit tests
//! - **Portable**: runs in a terminal, a GUI, or headless
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 tile grid, movability, settling and completion
//! - [`shuffle`]: random-walk scrambles that are always solvable
//! - [`controller`]: one-move-at-a-time state machine with an animation gate
//! - [`game`]: game session tying the pieces together with statistics
//! - [`stats`]: move counter and `mm:ss` stopwatch
//! - [`rng`]: seedable LCG used by the shuffler
//!
//! # Example
//!
//! ```
//! use puzzle15_core::{Game, GameEvent, GameStatus};
//! use puzzle15_types::{Direction, MOVE_ANIMATION_MS};
//!
//! let mut game = Game::new(12345);
//! game.start();
//! assert_eq!(game.status(), GameStatus::Playing);
//!
//! // Slide whichever tile can move; it settles once the animation elapses.
//! let dir = game.board().movable_directions()[0];
//! assert!(game.trigger(dir));
//! let event = game.tick(MOVE_ANIMATION_MS);
//! assert!(event.is_some());
//! assert_eq!(game.stats().moves(), 1);
//! ```
//!
//! # Timing
//!
//! Call [`Game::tick`](game::Game::tick) every frame with the elapsed time.
//! A move animates for `MOVE_ANIMATION_MS` before the board settles; intents
//! arriving in the meantime are dropped.

pub mod board;
pub mod controller;
pub mod game;
pub mod rng;
pub mod shuffle;
pub mod snapshot;
pub mod stats;

pub use puzzle15_types as types;

// Re-export commonly used types for convenience
pub use board::{neighbor, Board, Cell, Tile};
pub use controller::{MoveController, MovePhase, MoveTicket};
pub use game::{Game, GameEvent, GameStatus};
pub use rng::SimpleRng;
pub use shuffle::ShuffleEngine;
pub use snapshot::GameSnapshot;
pub use stats::{format_time, GameStats, Stopwatch};
