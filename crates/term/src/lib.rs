//! Terminal front-end for the puzzle.
//!
//! Rendering is split in two:
//! - [`board_view`]: pure mapping from a `GameSnapshot` to a text [`Frame`]
//! - [`renderer`]: flushes frames to the terminal, rewriting changed rows only
//!
//! `core` stays free of any terminal dependency.

pub mod board_view;
pub mod frame;
pub mod renderer;

pub use puzzle15_core as core;
pub use puzzle15_ranking as ranking;
pub use puzzle15_types as types;

pub use board_view::BoardView;
pub use frame::{Frame, Line, LineStyle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
