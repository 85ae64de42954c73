use super::kinds::{StyleFamily, StyleTag};
use super::lexer::lex;
use super::span::Span;
use super::types::{Lexeme, MarkupToken};

/// Parses a whole document into [`MarkupToken`]s.
///
/// Each call is independent: parsing the same text twice yields identical
/// tokens. The tokens cover the input without gaps.
pub fn parse(content: &str) -> Vec<MarkupToken> {
    parse_range(content, Span::new(0, content.len()))
}

/// Parses `range` of `content`, keeping offsets absolute.
///
/// Used by the renderer to expand the inner range of a style span. A range
/// that is out of bounds or not on char boundaries yields no tokens.
pub fn parse_range(content: &str, range: Span) -> Vec<MarkupToken> {
    let Some(slice) = content.get(range.start..range.end) else {
        return vec![];
    };
    pair(lex(range.start, slice))
}

/// Second pass: pairs open tags with close tags.
///
/// An open tag pairs with the first following close tag of the same family
/// in this run, whatever lies between them. Everything between the two tags
/// becomes the span's inner range. Unpaired tags become plain text, which
/// merges with neighbouring text.
fn pair(lexemes: Vec<Lexeme>) -> Vec<MarkupToken> {
    let mut out: Vec<MarkupToken> = Vec::with_capacity(lexemes.len());
    let mut i = 0;

    while i < lexemes.len() {
        match &lexemes[i] {
            Lexeme::Text(span) => push_text(&mut out, *span),
            Lexeme::Tag {
                tag: StyleTag::Open(kind),
                span: open,
            } => {
                if let Some(j) = find_close(&lexemes, i + 1, kind.family()) {
                    let close = lexemes[j].span();
                    out.push(MarkupToken::StyleSpan {
                        kind: *kind,
                        full: Span::new(open.start, close.end),
                        inner: Span::new(open.end, close.start),
                    });
                    i = j + 1;
                    continue;
                }
                push_text(&mut out, *open);
            }
            Lexeme::Tag {
                tag: StyleTag::Close(_),
                span,
            } => push_text(&mut out, *span),
            Lexeme::Table { table, span } => out.push(MarkupToken::TableDirective {
                full: *span,
                table: table.clone(),
            }),
        }
        i += 1;
    }

    out
}

fn find_close(lexemes: &[Lexeme], from: usize, family: StyleFamily) -> Option<usize> {
    lexemes
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, lexeme)| {
            matches!(lexeme, Lexeme::Tag { tag: StyleTag::Close(f), .. } if *f == family)
        })
        .map(|(j, _)| j)
}

/// Appends text, extending the previous token when it is adjacent text.
fn push_text(out: &mut Vec<MarkupToken>, span: Span) {
    if let Some(MarkupToken::PlainText(prev)) = out.last_mut()
        && prev.end == span.start
    {
        prev.end = span.end;
        return;
    }
    out.push(MarkupToken::PlainText(span));
}
