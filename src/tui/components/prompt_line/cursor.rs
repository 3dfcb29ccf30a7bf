//! Cursor position tracking for the single-line prompt.
//!
//! `CursorState` owns the cursor byte offset. All navigation methods accept
//! `buffer: &str` explicitly; the text itself is owned by `LineInput`.

use unicode_width::UnicodeWidthStr;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0 }
    }

    pub fn move_left(&mut self, buffer: &str) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_right(&mut self, buffer: &str) -> bool {
        if self.pos >= buffer.len() {
            return false;
        }
        self.pos = next_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_home(&mut self) -> bool {
        std::mem::replace(&mut self.pos, 0) != 0
    }

    pub fn move_end(&mut self, buffer: &str) -> bool {
        std::mem::replace(&mut self.pos, buffer.len()) != buffer.len()
    }

    /// Display column of the cursor, counting wide glyphs as two cells.
    pub fn column(&self, buffer: &str) -> usize {
        buffer[..self.pos].width()
    }
}

pub(super) fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

pub(super) fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}
