//! BoardView: maps a `GameSnapshot` into a text frame.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, GameStatus};
use crate::frame::{Frame, Line, LineStyle};
use crate::ranking::RankingEntry;
use crate::types::{Direction, GRID_WIDTH};

const RULE: &str = "+----+----+----+----+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardView {
    /// Left margin in columns
    indent: usize,
    show_help: bool,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            indent: 2,
            show_help: true,
        }
    }
}

impl BoardView {
    pub fn new(indent: usize) -> Self {
        Self {
            indent,
            ..Self::default()
        }
    }

    pub fn without_help(mut self) -> Self {
        self.show_help = false;
        self
    }

    pub fn render(&self, snap: &GameSnapshot, ranking: &[RankingEntry]) -> Frame {
        let mut frame = Frame::new();
        self.render_into(snap, ranking, &mut frame);
        frame
    }

    /// Render into an existing frame, replacing its contents.
    pub fn render_into(&self, snap: &GameSnapshot, ranking: &[RankingEntry], frame: &mut Frame) {
        frame.clear();
        let pad = " ".repeat(self.indent);

        frame.push(Line::styled(format!("{pad}15 PUZZLE"), LineStyle::Title));
        frame.blank();

        let active = snap.animating;
        frame.push(Line::new(format!("{pad}{RULE}")));
        for row in snap.cells.chunks(GRID_WIDTH) {
            let mut text = pad.clone();
            text.push('|');
            let mut row_active = false;
            for cell in row {
                match cell {
                    Some(tile) if active.map(|(n, _)| n) == Some(tile.number()) => {
                        row_active = true;
                        let mark = active.map_or(' ', |(_, action)| arrow(action.direction()));
                        text.push_str(&format!(" {:>2}{}|", tile.number(), mark));
                    }
                    Some(tile) => text.push_str(&format!(" {:>2} |", tile.number())),
                    None => text.push_str("    |"),
                }
            }
            let style = if row_active {
                LineStyle::Active
            } else {
                LineStyle::Normal
            };
            frame.push(Line::styled(text, style));
            frame.push(Line::new(format!("{pad}{RULE}")));
        }

        frame.blank();
        frame.push(Line::new(format!(
            "{pad}Moves: {:<5} Time: {}",
            snap.moves,
            snap.time()
        )));
        frame.push(Line::new(format!("{pad}{}", status_text(snap))));

        if self.show_help {
            frame.push(Line::styled(
                format!("{pad}arrows/wasd/hjkl move  enter new game  r reset  q quit"),
                LineStyle::Dim,
            ));
        }

        frame.blank();
        frame.push(Line::styled(format!("{pad}Best"), LineStyle::Title));
        if ranking.is_empty() {
            frame.push(Line::styled(format!("{pad}  no games yet"), LineStyle::Dim));
        }
        for (i, entry) in ranking.iter().enumerate() {
            frame.push(Line::new(format!(
                "{pad}{:>2}. {:>4} moves  {}",
                i + 1,
                entry.moves,
                entry.time
            )));
        }
    }
}

fn arrow(dir: Direction) -> char {
    match dir {
        Direction::Top => '^',
        Direction::Left => '<',
        Direction::Right => '>',
        Direction::Down => 'v',
    }
}

fn status_text(snap: &GameSnapshot) -> &'static str {
    match snap.status {
        GameStatus::Ready => "Press Enter to shuffle",
        GameStatus::Playing => "Playing",
        GameStatus::Completed => "Solved! Press Enter to play again",
    }
}
