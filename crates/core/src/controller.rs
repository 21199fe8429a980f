//! Move controller - one tile move at a time
//!
//! A move goes `Idle -> Selected -> Animating -> Settled -> Idle`:
//!
//! 1. [`MoveController::trigger`] selects the tile movable in the requested
//!    direction and tags its action (Selected, immediately Animating).
//! 2. The board is left untouched for `MOVE_ANIMATION_MS` so a presentation
//!    layer can play the slide.
//! 3. When the delay elapses the tile is swapped with the empty cell, the
//!    transient flags are cleared and movability is recomputed.
//!
//! Intents arriving while a move is in flight are dropped. Every move is
//! identified by a [`MoveTicket`] carrying a generation number; `reset`
//! bumps the generation so a continuation scheduled before a reset can never
//! settle a stale move.

use tracing::debug;

use crate::board::Board;
use crate::types::{Direction, MOVE_ANIMATION_MS};

/// Token identifying one in-flight move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveTicket {
    pub direction: Direction,
    pub generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePhase {
    Idle,
    Animating {
        ticket: MoveTicket,
        remaining_ms: u32,
    },
}

#[derive(Debug, Clone)]
pub struct MoveController {
    phase: MovePhase,
    generation: u32,
    animation_ms: u32,
}

impl MoveController {
    pub fn new() -> Self {
        Self::with_animation_ms(MOVE_ANIMATION_MS)
    }

    /// Use a custom animation delay. Zero settles on the next `tick`.
    pub fn with_animation_ms(animation_ms: u32) -> Self {
        Self {
            phase: MovePhase::Idle,
            generation: 0,
            animation_ms,
        }
    }

    pub fn phase(&self) -> MovePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == MovePhase::Idle
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn animation_ms(&self) -> u32 {
        self.animation_ms
    }

    /// The move currently in flight
    pub fn pending(&self) -> Option<MoveTicket> {
        match self.phase {
            MovePhase::Idle => None,
            MovePhase::Animating { ticket, .. } => Some(ticket),
        }
    }

    /// Start moving the tile that can slide in `dir`.
    ///
    /// Returns `None` when a move is already in flight or no tile can move in
    /// `dir`; the board is left untouched in both cases.
    pub fn trigger(&mut self, board: &mut Board, dir: Direction) -> Option<MoveTicket> {
        if let Some(pending) = self.pending() {
            debug!(
                requested = dir.as_str(),
                in_flight = pending.direction.as_str(),
                "move ignored while another move is animating"
            );
            return None;
        }
        if !board.begin_move(dir) {
            return None;
        }

        self.generation = self.generation.wrapping_add(1);
        let ticket = MoveTicket {
            direction: dir,
            generation: self.generation,
        };
        self.phase = MovePhase::Animating {
            ticket,
            remaining_ms: self.animation_ms,
        };
        Some(ticket)
    }

    /// Advance the animation gate by `elapsed_ms`.
    ///
    /// Returns the ticket of the move that settled during this tick, if any.
    /// Callers should check [`Board::is_complete`] when a move settles.
    pub fn tick(&mut self, board: &mut Board, elapsed_ms: u32) -> Option<MoveTicket> {
        let MovePhase::Animating {
            ticket,
            remaining_ms,
        } = self.phase
        else {
            return None;
        };

        let remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
        if remaining_ms > 0 {
            self.phase = MovePhase::Animating {
                ticket,
                remaining_ms,
            };
            return None;
        }

        self.complete(board, ticket).then_some(ticket)
    }

    /// Settle the move identified by `ticket`.
    ///
    /// For hosts that schedule the continuation with their own timer. A stale
    /// ticket (already settled, or issued before a reset) is discarded and
    /// the board is not touched. Returns whether a tile was moved.
    pub fn complete(&mut self, board: &mut Board, ticket: MoveTicket) -> bool {
        if self.pending() != Some(ticket) {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "discarding stale move continuation"
            );
            return false;
        }

        let moved = board.settle(ticket.direction);
        board.clear_transient();
        board.compute_movable();
        self.phase = MovePhase::Idle;
        moved
    }

    /// Drop any in-flight move and invalidate outstanding tickets
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.phase = MovePhase::Idle;
    }
}

impl Default for MoveController {
    fn default() -> Self {
        Self::new()
    }
}
