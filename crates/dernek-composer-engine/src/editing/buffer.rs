use std::ops::Range;

use xi_rope::Rope;

use super::edit::BufferEdit;

/// Plain-text document content plus a cursor, stored as UTF-8 byte offsets.
///
/// Owned by the host editor. Offsets that fall inside a character are
/// clamped down to the previous character boundary.
#[derive(Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
    cursor: usize,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        let rope = Rope::from(text);
        let cursor = rope.len();
        Self { rope, cursor }
    }

    /// Creates a buffer from raw bytes, rejecting invalid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = self.floor_boundary(offset);
    }

    /// Returns the text in `range`, clamped to the buffer.
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = self.floor_boundary(range.start);
        let end = self.floor_boundary(range.end).max(start);
        self.rope.slice_to_cow(start..end).into_owned()
    }

    /// Replaces `range` with `text` and applies the edit's cursor.
    ///
    /// This is the only mutation the mention engine asks for.
    pub fn apply(&mut self, edit: &BufferEdit) {
        let start = self.floor_boundary(edit.range.start);
        let end = self.floor_boundary(edit.range.end).max(start);
        self.rope.edit(start..end, edit.text.as_str());
        self.set_cursor(edit.cursor_after);
    }

    /// Inserts `text` at the cursor, as typing does.
    pub fn insert(&mut self, text: &str) {
        let at = self.cursor;
        self.apply(&BufferEdit::replace(at..at, text));
    }

    /// Deletes the character before the cursor, as Backspace does.
    pub fn delete_backward(&mut self) {
        if let Some(start) = self.prev_char(self.cursor) {
            self.apply(&BufferEdit::replace(start..self.cursor, ""));
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_char(self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.rope.len()
            && let Some(next) = self.rope.next_codepoint_offset(self.cursor)
        {
            self.cursor = next;
        }
    }

    fn prev_char(&self, offset: usize) -> Option<usize> {
        if offset == 0 {
            return None;
        }
        self.rope.prev_codepoint_offset(offset)
    }

    /// Walks the rope locally; never copies the text.
    fn floor_boundary(&self, offset: usize) -> usize {
        let len = self.rope.len();
        if offset == 0 || offset >= len {
            return offset.min(len);
        }
        self.rope.at_or_prev_codepoint_boundary(offset).unwrap_or(0)
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("text", &self.text())
            .field("cursor", &self.cursor)
            .finish()
    }
}
