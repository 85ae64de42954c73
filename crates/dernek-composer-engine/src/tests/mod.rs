//! Cross-module properties of the markup pipeline.
//!
//! Every document, however malformed, must parse into tokens that tile it
//! exactly, and serialized directives must parse back into the same shape.


use std::sync::Arc;

use crate::entities::{EntityRecord, FieldCatalog, FieldKey};
use crate::markup::{MarkupToken, parse, serialize};
use crate::render::{DisplayNode, render_preview};

const DOCUMENTS: &[&str] = &[
    "",
    "düz metin",
    "Hello [[B]]world[[/B]]!",
    "[[B]]a[[I]]b[[/B]]c[[/I]]",
    "[[B]][[B]]x[[/B]][[/B]]",
    "[[/B]]yetim kapanış",
    "[[",
    "]]",
    "[[[[B]]x[[/B]]",
    "[[SIZE=]]x[[/SIZE]]",
    "[[SIZE=14]]x[[/SIZE]] [[SIZE=99999999]]y[[/SIZE]]",
    "[[TABLO:COLS=Ad # ROWS=]]",
    "[[TABLO:COLS= # ROWS=x]]",
    "[[TABLO:bozuk]]",
    "satır 1\nsatır 2 [[U]]alt\nçizgi[[/U]]",
    "@uyetablo mehmet",
    "[[B]]İğüşçö[[/B]]",
];

#[test]
fn every_document_tiles_exactly() {
    for doc in DOCUMENTS {
        invariants::check_tiling(doc, &parse(doc));
    }
}

#[test]
fn style_inner_spans_sit_inside_full_spans() {
    for doc in DOCUMENTS {
        invariants::check_nesting(doc, &parse(doc));
    }
}

#[test]
fn parsing_is_idempotent() {
    for doc in DOCUMENTS {
        assert_eq!(parse(doc), parse(doc), "{doc:?}");
    }
}

#[test]
fn serialized_tables_parse_back() {
    let catalog = FieldCatalog::default_members();
    let people: Vec<Arc<EntityRecord>> = [("Ayşe", "Kaya"), ("Ali", "Demir|Öz"), ("Can", "")]
        .into_iter()
        .enumerate()
        .map(|(i, (first, last))| {
            Arc::new(
                EntityRecord::new(i.to_string())
                    .with(FieldKey::FirstName, first)
                    .with(FieldKey::LastName, last),
            )
        })
        .collect();
    let fields = [FieldKey::FirstName, FieldKey::LastName, FieldKey::Phone];

    let directive = serialize(&people, &fields, &catalog);
    let doc = format!("Liste:\n{directive}\nSon.");
    let tokens = parse(&doc);
    let tables: Vec<_> = tokens
        .iter()
        .filter_map(|t| match t {
            MarkupToken::TableDirective { table, .. } => Some(table),
            _ => None,
        })
        .collect();

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].headers, vec!["Ad", "Soyad", "Telefon"]);
    assert_eq!(
        tables[0].rows,
        vec![
            vec!["Ayşe", "Kaya", "-"],
            vec!["Ali", "DemirÖz", "-"],
            vec!["Can", "-", "-"],
        ]
    );
}

#[test]
fn preview_keeps_all_visible_text() {
    let nodes = render_preview("a [[B]]b [[I]]c[[/I]][[/B]] d");
    fn collect(nodes: &[DisplayNode], out: &mut String) {
        for node in nodes {
            match node {
                DisplayNode::Text(t) => out.push_str(t),
                DisplayNode::Styled { children, .. } => collect(children, out),
                DisplayNode::LineBreak => out.push('\n'),
                DisplayNode::Table { .. } => {}
            }
        }
    }
    let mut text = String::new();
    collect(&nodes, &mut text);
    assert_eq!(text, "a b c d");
}
