//! # Inline Markup
//!
//! The composer stores formatting and generated tables inside the plain text
//! of the document as `[[...]]` regions:
//!
//! - style spans: `[[B]]…[[/B]]`, `[[I]]…[[/I]]`, `[[U]]…[[/U]]`, `[[SIZE=n]]…[[/SIZE]]`
//! - tables: `[[TABLO:COLS=h1|h2 # ROWS=a|b;c|d]]`
//!
//! ## Parsing
//!
//! Parsing is two explicit passes, so each fallback can be tested on its own:
//!
//! 1. **`lexer`** splits the text into text, style tags and table directives.
//!    Malformed regions stay text.
//! 2. **`parser`** pairs each open tag with the first following close tag of
//!    the same family. Unpaired tags become text.
//!
//! Parsing is stateless and recomputed on every render pass.
//!
//! ## Modules
//!
//! - **`span`**, **`cursor`**: byte spans and the scanning cursor
//! - **`kinds`**: delimiter-owning types (`Directive`, `StyleKind`, `Table`)
//! - **`types`**: `Lexeme` and `MarkupToken`
//! - **`serialize`**: selection to directive text
//! - **`style`**: wrapping a selection in a style span

pub mod cursor;
pub mod kinds;
pub mod lexer;
pub mod parser;
pub mod serialize;
pub mod span;
pub mod style;
pub mod types;

pub use kinds::{StyleFamily, StyleKind, StyleTag, Table};
pub use lexer::lex;
pub use parser::{parse, parse_range};
pub use serialize::{build_table, serialize, strip_delimiters};
pub use span::Span;
pub use style::style_edit;
pub use types::{Lexeme, MarkupToken};
