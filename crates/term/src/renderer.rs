//! TerminalRenderer: flushes a text frame to a real terminal.
//!
//! The first frame (and any frame after `invalidate`) is a full redraw;
//! afterwards only rows that changed are rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::frame::{Frame, Line, LineStyle};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Frame>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a frame, swapping it into internal state.
    ///
    /// Callers keep one `Frame` and pass it in every frame; after the call it
    /// holds the previous contents and can be re-rendered into.
    pub fn draw_swap(&mut self, frame: &mut Frame) -> Result<()> {
        self.buf.clear();
        match self.last.take() {
            Some(mut prev) => {
                encode_diff_into(&prev, frame, &mut self.buf)?;
                self.flush_buf()?;
                std::mem::swap(&mut prev, frame);
                self.last = Some(prev);
            }
            None => {
                encode_full_into(frame, &mut self.buf)?;
                self.flush_buf()?;
                self.last = Some(std::mem::take(frame));
            }
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    for (y, line) in frame.lines().iter().enumerate() {
        encode_line_into(out, y, line)?;
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the rows that differ between `prev` and `next`.
pub fn encode_diff_into(prev: &Frame, next: &Frame, out: &mut Vec<u8>) -> Result<()> {
    for_each_changed_row(prev, next, |y| match next.get(y) {
        Some(line) => encode_line_into(out, y, line),
        None => {
            // Frame shrank: blank the leftover row.
            out.queue(cursor::MoveTo(0, to_row(y)))?;
            out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
            Ok(())
        }
    })?;
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn encode_line_into(out: &mut Vec<u8>, y: usize, line: &Line) -> Result<()> {
    out.queue(cursor::MoveTo(0, to_row(y)))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    apply_style_into(out, line.style)?;
    out.queue(Print(&line.text))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: LineStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(style_color(style)))?;
    match style {
        LineStyle::Title | LineStyle::Active => {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        LineStyle::Dim => {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        LineStyle::Normal => {}
    }
    Ok(())
}

fn style_color(style: LineStyle) -> Color {
    match style {
        LineStyle::Normal => Color::Reset,
        LineStyle::Title => Color::Cyan,
        LineStyle::Active => Color::Yellow,
        LineStyle::Dim => Color::DarkGrey,
    }
}

fn to_row(y: usize) -> u16 {
    u16::try_from(y).unwrap_or(u16::MAX)
}

fn for_each_changed_row(
    prev: &Frame,
    next: &Frame,
    mut f: impl FnMut(usize) -> Result<()>,
) -> Result<()> {
    let rows = prev.len().max(next.len());
    for y in 0..rows {
        if prev.get(y) != next.get(y) {
            f(y)?;
        }
    }
    Ok(())
}
