use crate::markup::{MarkupToken, Span, StyleKind, parse_range};

/// Node of the rendered preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNode {
    /// Unescaped text without newlines.
    Text(String),
    LineBreak,
    Styled {
        kind: StyleKind,
        children: Vec<DisplayNode>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Renders the whole document. Style spans nest, so their inner text is
/// parsed again as its own range.
pub fn render_preview(content: &str) -> Vec<DisplayNode> {
    render_range(content, Span::new(0, content.len()))
}

fn render_range(content: &str, range: Span) -> Vec<DisplayNode> {
    let mut nodes = Vec::new();
    for token in parse_range(content, range) {
        match token {
            MarkupToken::PlainText(span) => push_text(&mut nodes, span.text(content)),
            MarkupToken::StyleSpan { kind, inner, .. } => nodes.push(DisplayNode::Styled {
                kind,
                children: render_range(content, inner),
            }),
            MarkupToken::TableDirective { table, .. } => nodes.push(DisplayNode::Table {
                headers: table.headers,
                rows: table.rows,
            }),
        }
    }
    nodes
}

fn push_text(nodes: &mut Vec<DisplayNode>, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            nodes.push(DisplayNode::LineBreak);
        }
        if !line.is_empty() {
            nodes.push(DisplayNode::Text(line.to_string()));
        }
    }
}
