/// A parsed `[[TABLO:COLS=… # ROWS=…]]` directive.
///
/// Layout of the body:
///
/// ```text
/// TABLO:COLS=Ad|Soyad # ROWS=Ahmet|Yılmaz;Ayşe|Demir
/// ```
///
/// Cells are separated by `|`, rows by `;`, and the two parts by `#`. The
/// serializer strips those characters from every cell, so they never appear
/// inside cell text. Nor does `]]`, which would close the directive early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub const KEYWORD: &'static str = "TABLO:";
    pub const COLS: &'static str = "COLS=";
    pub const ROWS: &'static str = "ROWS=";
    pub const PART_SEPARATOR: char = '#';
    pub const CELL_SEPARATOR: char = '|';
    pub const ROW_SEPARATOR: char = ';';
    /// Rendered in place of a missing or empty value.
    pub const EMPTY_CELL: &'static str = "-";

    /// Characters removed from cell text before joining.
    pub const DELIMITERS: [char; 3] = [
        Self::CELL_SEPARATOR,
        Self::PART_SEPARATOR,
        Self::ROW_SEPARATOR,
    ];

    /// Parses a directive body (the text between `[[` and `]]`).
    ///
    /// Returns `None` when the keyword, the `COLS=` part or the `ROWS=` part is
    /// missing; the caller keeps such regions as literal text.
    pub fn parse_body(body: &str) -> Option<Self> {
        let rest = body.strip_prefix(Self::KEYWORD)?;
        let (cols_part, rows_part) = rest.split_once(Self::PART_SEPARATOR)?;
        let cols = cols_part.trim().strip_prefix(Self::COLS)?.trim();
        let rows = rows_part.trim().strip_prefix(Self::ROWS)?.trim();

        if cols.is_empty() {
            return None;
        }

        let headers = split_cells(cols);
        let rows = if rows.is_empty() {
            Vec::new()
        } else {
            rows.split(Self::ROW_SEPARATOR).map(split_cells).collect()
        };

        Some(Self { headers, rows })
    }

    /// Renders the directive body back to text, without `[[` `]]`.
    ///
    /// A body ending in `]` gets a trailing space so the closing `]]` is not
    /// matched one character early. Parsing trims it off again.
    pub fn to_body(&self) -> String {
        let rows = self
            .rows
            .iter()
            .map(|row| row.join(&Self::CELL_SEPARATOR.to_string()))
            .collect::<Vec<_>>()
            .join(&Self::ROW_SEPARATOR.to_string());
        let mut body = format!(
            "{}{}{} {} {}{}",
            Self::KEYWORD,
            Self::COLS,
            self.headers.join(&Self::CELL_SEPARATOR.to_string()),
            Self::PART_SEPARATOR,
            Self::ROWS,
            rows
        );
        if body.ends_with(']') {
            body.push(' ');
        }
        body
    }
}

fn split_cells(part: &str) -> Vec<String> {
    part.split(Table::CELL_SEPARATOR)
        .map(|cell| cell.trim().to_string())
        .collect()
}
