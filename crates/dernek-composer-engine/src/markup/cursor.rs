/// A byte cursor over markup text with position tracking.
///
/// `base` is the absolute offset of `s` inside the full document, so spans
/// produced while parsing a sub-range still point into the original buffer.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Absolute offset of `s[0]` in the document.
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Current absolute byte position.
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes().get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances past one whole UTF-8 character.
    pub fn bump_char(&mut self) {
        let width = self.s[self.i..].chars().next().map_or(1, char::len_utf8);
        self.i += width;
    }

    /// Finds the next occurrence of `pat` at or after the cursor, as a local index.
    pub fn find(&self, pat: &str) -> Option<usize> {
        self.s.get(self.i..)?.find(pat).map(|at| self.i + at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello", 10);
        assert_eq!(cur.pos(), 10);
        assert!(!cur.eof());
        cur.bump_char();
        assert_eq!(cur.pos(), 11);
    }

    #[test]
    fn bump_char_steps_over_multibyte() {
        let mut cur = Cursor::new("ğa", 0);
        cur.bump_char();
        assert_eq!(cur.i, 2);
        assert!(cur.starts_with(b"a"));
    }

    #[test]
    fn starts_with_at_eof() {
        let mut cur = Cursor::new("ab", 0);
        cur.bump_n(2);
        assert!(cur.eof());
        assert!(cur.starts_with(b""));
        assert!(!cur.starts_with(b"a"));
    }

    #[test]
    fn starts_with_pattern_longer_than_remaining() {
        let cur = Cursor::new("[[", 0);
        assert!(!cur.starts_with(b"[[B]]"));
    }

    #[test]
    fn find_is_relative_to_cursor() {
        let mut cur = Cursor::new("]] x ]]", 0);
        cur.bump_n(2);
        assert_eq!(cur.find("]]"), Some(5));
    }
}
