/// A byte range `[start, end)` into the document text.
///
/// Markup tokens store spans rather than copied text, so any token can be
/// sliced back out of the buffer it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Slices `content` with this span. Out-of-range or non-boundary spans yield `""`.
    pub fn text(self, content: &str) -> &str {
        content.get(self.start..self.end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_empty() {
        assert_eq!(Span::new(2, 7).len(), 5);
        assert!(Span::new(4, 4).is_empty());
        assert!(Span::new(5, 3).is_empty());
    }

    #[test]
    fn text_slices_content() {
        assert_eq!(Span::new(6, 11).text("hello world"), "world");
    }

    #[test]
    fn text_out_of_range_is_empty() {
        assert_eq!(Span::new(3, 40).text("short"), "");
        // 'ı' is two bytes; offset 1 splits it
        assert_eq!(Span::new(1, 2).text("ıx"), "");
    }
}
