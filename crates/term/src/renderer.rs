//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previous one and only changed runs are
//! written.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    enhanced_keys: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            enhanced_keys: false,
        }
    }

    /// Raw mode, alternate screen, and key-release reporting where the
    /// terminal supports it.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.enhanced_keys {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.enhanced_keys {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Whether key releases are being reported by the terminal.
    pub fn enhanced_keys(&self) -> bool {
        self.enhanced_keys
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer and swap it with the previous frame, so the caller
    /// gets a buffer back to render into without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.last.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        let mut prev = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
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

/// Queue the bytes that turn `prev` into `next` on screen.
///
/// Without a previous frame of the same size the screen is cleared and every
/// row is written.
fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut style = None;
    for y in 0..next.height() {
        match prev {
            Some(prev) => {
                for (x, len) in changed_runs(prev, next, y) {
                    write_run(out, next, x, y, len, &mut style)?;
                }
            }
            None => write_run(out, next, 0, y, next.width(), &mut style)?,
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Spans `(x, len)` of row `y` whose cells differ between the frames.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer, y: u16) -> Vec<(u16, u16)> {
    let mut runs = Vec::new();
    let mut start = None;
    for x in 0..next.width() {
        let changed = prev.get(x, y) != next.get(x, y);
        match (changed, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                runs.push((s, x - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, next.width() - s));
    }
    runs
}

fn write_run(
    out: &mut Vec<u8>,
    fb: &FrameBuffer,
    x: u16,
    y: u16,
    len: u16,
    style: &mut Option<CellStyle>,
) -> Result<()> {
    out.queue(cursor::MoveTo(x, y))?;
    for dx in 0..len {
        let cell = fb.get(x + dx, y).unwrap_or_default();
        if *style != Some(cell.style) {
            apply_style(out, cell.style)?;
            *style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

fn apply_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    let color = |c: Rgb| Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    };
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_run(fb: &mut FrameBuffer, y: u16, xs: std::ops::Range<u16>) {
        fb.blend_rect(xs.start, y, xs.end - xs.start, 1, Rgb::WHITE, 255);
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = FrameBuffer::new(8, 1);
        let mut b = a.clone();
        white_run(&mut b, 0, 1..4);
        white_run(&mut b, 0, 6..8);

        assert_eq!(changed_runs(&a, &b, 0), vec![(1, 3), (6, 2)]);
        assert!(changed_runs(&a, &a, 0).is_empty());
    }

    #[test]
    fn unchanged_frame_writes_no_cells() {
        let fb = FrameBuffer::new(4, 2);
        let mut out = Vec::new();
        encode_frame(Some(&fb), &fb, &mut out).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains(' '));
        assert!(!text.contains("\x1b[2J"));
    }

    #[test]
    fn size_change_forces_full_redraw() {
        let small = FrameBuffer::new(2, 2);
        let mut big = FrameBuffer::new(3, 2);
        big.put_char(2, 1, 'X', CellStyle::default());

        let mut out = Vec::new();
        encode_frame(Some(&small), &big, &mut out).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("\x1b[2J"));
        assert!(text.contains('X'));
    }
}
