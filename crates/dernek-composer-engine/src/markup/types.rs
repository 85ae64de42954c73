use super::kinds::{StyleKind, StyleTag, Table};
use super::span::Span;

/// Output of the first pass: flat, unpaired pieces of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    /// Text outside any recognised `[[...]]` region, including malformed regions.
    Text(Span),
    /// A single style marker such as `[[B]]` or `[[/SIZE]]`.
    Tag { tag: StyleTag, span: Span },
    /// A well-formed table directive.
    Table { table: Table, span: Span },
}

impl Lexeme {
    pub fn span(&self) -> Span {
        match self {
            Lexeme::Text(span) | Lexeme::Tag { span, .. } | Lexeme::Table { span, .. } => *span,
        }
    }
}

/// A parsed markup token. Recomputed from the buffer on every render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    /// Literal text, unescaped. Escaping happens when it is displayed.
    PlainText(Span),
    /// A paired style span.
    StyleSpan {
        kind: StyleKind,
        /// Span including both tags.
        full: Span,
        /// Span between the tags. May itself contain markup.
        inner: Span,
    },
    /// An inline table directive.
    TableDirective { full: Span, table: Table },
}

impl MarkupToken {
    /// The full span covered by this token.
    pub fn span(&self) -> Span {
        match self {
            MarkupToken::PlainText(span) => *span,
            MarkupToken::StyleSpan { full, .. } | MarkupToken::TableDirective { full, .. } => *full,
        }
    }
}
