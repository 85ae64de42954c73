use std::sync::Arc;

use super::kinds::{Directive, Table};
use crate::entities::{EntityRecord, FieldCatalog, FieldKey};

/// Removes the structural delimiters `|`, `#` and `;` from cell text, and
/// splits any `]]` so it cannot close the directive.
///
/// Lossy: `"A|B"` becomes `"AB"` and `"a]]b"` becomes `"a] ]b"`.
pub fn strip_delimiters(cell: &str) -> String {
    let mut out = String::with_capacity(cell.len());
    for c in cell.chars().filter(|c| !Table::DELIMITERS.contains(c)) {
        if c == ']' && out.ends_with(']') {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Builds the table for `entities` × `fields`: one header per field (its
/// catalog label) and one row per entity, in the given orders.
pub fn build_table(
    entities: &[Arc<EntityRecord>],
    fields: &[FieldKey],
    catalog: &FieldCatalog,
) -> Table {
    let headers = fields
        .iter()
        .map(|&key| clean_cell(catalog.label(key)))
        .collect();
    let rows = entities
        .iter()
        .map(|entity| {
            fields
                .iter()
                .map(|&key| clean_cell(entity.value(key).unwrap_or_default()))
                .collect()
        })
        .collect();
    Table { headers, rows }
}

/// Serializes a selection into an inline directive:
/// `[[TABLO:COLS=<headers> # ROWS=<rows>]]`.
pub fn serialize(
    entities: &[Arc<EntityRecord>],
    fields: &[FieldKey],
    catalog: &FieldCatalog,
) -> String {
    Directive::wrap(&build_table(entities, fields, catalog).to_body())
}

fn clean_cell(value: &str) -> String {
    let cleaned = strip_delimiters(value).trim().to_string();
    if cleaned.is_empty() {
        Table::EMPTY_CELL.to_string()
    } else {
        cleaned
    }
}
