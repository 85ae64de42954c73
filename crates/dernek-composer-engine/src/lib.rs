pub mod composer;
pub mod editing;
pub mod entities;
pub mod markup;
pub mod mention;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use composer::{Composer, ComposerSettings, Key, LookupRequest, LookupResponse, Notice, Outcome};
pub use editing::{BufferEdit, TextBuffer};
pub use entities::*;
pub use markup::{MarkupToken, StyleKind, parse, serialize, style_edit};
pub use mention::{CommandTable, FieldLimitReached, MAX_SELECTED_FIELDS, MentionSession, Mode};
pub use render::{DisplayNode, preview_html, render_preview};
