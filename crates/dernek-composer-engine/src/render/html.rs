use html_escape::encode_text;

use super::display::{DisplayNode, render_preview};
use crate::markup::StyleKind;

/// Serializes a display tree to HTML. Text is escaped for display only;
/// the output is not a sanitization boundary.
pub fn to_html(nodes: &[DisplayNode]) -> String {
    let mut out = String::new();
    write_nodes(&mut out, nodes);
    out
}

/// Renders a document straight to HTML.
pub fn preview_html(content: &str) -> String {
    to_html(&render_preview(content))
}

fn write_nodes(out: &mut String, nodes: &[DisplayNode]) {
    for node in nodes {
        match node {
            DisplayNode::Text(text) => out.push_str(&encode_text(text)),
            DisplayNode::LineBreak => out.push_str("<br>"),
            DisplayNode::Styled { kind, children } => {
                let (open, close) = style_tags(*kind);
                out.push_str(&open);
                write_nodes(out, children);
                out.push_str(close);
            }
            DisplayNode::Table { headers, rows } => write_table(out, headers, rows),
        }
    }
}

fn style_tags(kind: StyleKind) -> (String, &'static str) {
    match kind {
        StyleKind::Bold => ("<b>".to_string(), "</b>"),
        StyleKind::Italic => ("<i>".to_string(), "</i>"),
        StyleKind::Underline => ("<u>".to_string(), "</u>"),
        StyleKind::Size(px) => (format!("<span style=\"font-size:{px}px\">"), "</span>"),
    }
}

fn write_table(out: &mut String, headers: &[String], rows: &[Vec<String>]) {
    out.push_str("<table><thead><tr>");
    for header in headers {
        out.push_str("<th>");
        out.push_str(&encode_text(header));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            out.push_str(&encode_text(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}
