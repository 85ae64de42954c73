//! # Preview Rendering
//!
//! Expands parsed markup into a display tree for the preview pane and, for
//! hand-off to print, into minimal HTML.
//!
//! - **`display`**: `DisplayNode` tree built from `MarkupToken`s
//! - **`html`**: HTML serialization with presentation-only escaping

pub mod display;
pub mod html;

pub use display::{DisplayNode, render_preview};
pub use html::{preview_html, to_html};
