/*!
 * # Editing
 *
 * The document text lives in a single **`xi_rope::Rope`** owned by the host
 * editor, together with a byte-offset cursor. The mention engine never
 * rewrites the buffer wholesale: every change it wants is expressed as a
 * **`BufferEdit`** (replace one byte range, then place the cursor) that the
 * host applies. This keeps the engine's write access to a single
 * splice-at-offset operation.
 *
 * ## Module Structure
 *
 * - **`buffer`**: `TextBuffer` with read, insert, delete and splice operations
 * - **`edit`**: `BufferEdit`, the value returned by session commits and style commands
 */

pub mod buffer;
pub mod edit;

pub use buffer::TextBuffer;
pub use edit::BufferEdit;
