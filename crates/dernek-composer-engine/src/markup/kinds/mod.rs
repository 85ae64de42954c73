//! # Markup Kinds
//!
//! Types that own the delimiters of the inline markup format. The lexer and
//! serializer call these constants and never hardcode `[[`, `|` or `;`.
//!
//! - **`Directive`**: `OPEN = "[["`, `CLOSE = "]]"` around every region
//! - **`StyleKind` / `StyleTag`**: `B`, `I`, `U`, `SIZE=<n>` and their `/` closers
//! - **`Table`**: `TABLO:COLS=h1|h2 # ROWS=a|b;c|d`

pub mod directive;
pub mod style;
pub mod table;

pub use directive::Directive;
pub use style::{StyleFamily, StyleKind, StyleTag};
pub use table::Table;
