use std::ops::Range;

/// A single splice into the document: replace `range` with `text`, then move
/// the cursor to `cursor_after`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferEdit {
    pub range: Range<usize>,
    pub text: String,
    pub cursor_after: usize,
}

impl BufferEdit {
    /// Replaces `range` and leaves the cursor at the end of the inserted text.
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor_after = range.start + text.len();
        Self {
            range,
            text,
            cursor_after,
        }
    }

    /// Applies the edit to a plain string. Returns `None` if the range is out
    /// of bounds or splits a character.
    pub fn apply_to(&self, content: &str) -> Option<String> {
        let head = content.get(..self.range.start)?;
        let tail = content.get(self.range.end..)?;
        Some(format!("{head}{}{tail}", self.text))
    }
}
