use super::cursor::Cursor;
use super::kinds::{Directive, StyleTag, Table};
use super::span::Span;
use super::types::Lexeme;

/// First pass: splits `s` into text, style tags and table directives.
///
/// `base` is the absolute offset of `s` in the document. Every `[[` is paired
/// with the nearest following `]]` (non-greedy). A region whose body is
/// neither a style tag nor a well-formed table stays text, as does an
/// unclosed `[[`.
pub fn lex(base: usize, s: &str) -> Vec<Lexeme> {
    let mut cur = Cursor::new(s, base);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<Lexeme>, start: usize, end: usize) {
        if end > start {
            out.push(Lexeme::Text(Span { start, end }));
        }
    }

    while !cur.eof() {
        match try_lex_region(&mut cur) {
            Region::Recognised(lexeme) => {
                let span = lexeme.span();
                flush_text(&mut out, text_start, span.start);
                text_start = span.end;
                out.push(lexeme);
            }
            // Consumed; stays part of the pending text run.
            Region::Literal => {}
            Region::NotARegion => cur.bump_char(),
        }
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

enum Region {
    Recognised(Lexeme),
    Literal,
    NotARegion,
}

/// Attempts to lex a `[[...]]` region at the cursor.
///
/// A closed region with an unrecognised body is consumed as `Literal`, so its
/// contents are not rescanned for nested tags.
fn try_lex_region(cur: &mut Cursor<'_>) -> Region {
    if !cur.starts_with(Directive::OPEN.as_bytes()) {
        return Region::NotARegion;
    }

    let mut ahead = cur.clone();
    ahead.bump_n(Directive::OPEN.len());
    let body_start = ahead.i;
    let Some(close_at) = ahead.find(Directive::CLOSE) else {
        return Region::NotARegion;
    };

    let body = &cur.s[body_start..close_at];
    let start = cur.pos();
    let end = cur.base + close_at + Directive::CLOSE.len();
    let span = Span { start, end };
    cur.bump_n(end - start);

    if let Some(tag) = StyleTag::parse(body) {
        Region::Recognised(Lexeme::Tag { tag, span })
    } else if let Some(table) = Table::parse_body(body) {
        Region::Recognised(Lexeme::Table { table, span })
    } else {
        Region::Literal
    }
}
