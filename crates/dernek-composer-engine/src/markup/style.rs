use std::ops::Range;

use super::kinds::{Directive, StyleKind};
use crate::editing::BufferEdit;

/// Wraps `selection` in a style span, e.g. `[[B]]selected[[/B]]`.
///
/// The cursor lands after the closing tag. An empty selection inserts an
/// empty pair. Returns `None` if the selection is out of bounds or splits a
/// character. Spans are not checked against existing markup.
pub fn style_edit(content: &str, selection: Range<usize>, kind: StyleKind) -> Option<BufferEdit> {
    let selected = content.get(selection.clone())?;
    let text = format!(
        "{}{selected}{}",
        Directive::wrap(&kind.open_body()),
        Directive::wrap(kind.close_body())
    );
    Some(BufferEdit::replace(selection, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_selection_in_bold() {
        let content = "Genel Kurul duyurusu";
        let edit = style_edit(content, 0..11, StyleKind::Bold).unwrap();
        assert_eq!(
            edit.apply_to(content).unwrap(),
            "[[B]]Genel Kurul[[/B]] duyurusu"
        );
        assert_eq!(edit.cursor_after, "[[B]]Genel Kurul[[/B]]".len());
    }

    #[test]
    fn size_span_carries_its_parameter() {
        let content = "Başlık";
        let edit = style_edit(content, 0..content.len(), StyleKind::Size(18)).unwrap();
        assert_eq!(edit.text, "[[SIZE=18]]Başlık[[/SIZE]]");
    }

    #[test]
    fn rejects_selection_inside_a_character() {
        assert_eq!(style_edit("ş", 0..1, StyleKind::Italic), None);
    }
}
