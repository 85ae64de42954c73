/*!
 * # Mention Engine
 *
 * Lets an author type `@` in the document, pick members and fields from a
 * popup, and get a table directive spliced back into the text.
 *
 * ## Flow
 *
 * 1. Every buffer change runs the **scanner** over the text before the
 *    cursor. It finds the nearest `@` and classifies what follows it against
 *    the **command table** (`@uye`, `@uyetablo`).
 * 2. The **session** moves between `Idle`, `CommandMenu`, `EntitySearch` and
 *    `FieldSelect` in response to scanner output and explicit actions
 *    (picks, field toggles, keys).
 * 3. On commit the session serializes its selection and returns a
 *    `BufferEdit` replacing the trigger span. It then resets to `Idle`.
 *
 * The session is a plain value owned by the host; nothing here runs in the
 * background. Lookups are driven by `composer::Composer`.
 */

pub mod commands;
pub mod normalize;
pub mod scanner;
pub mod session;

pub use commands::{Command, CommandTable};
pub use normalize::fold_turkish;
pub use scanner::{TRIGGER, TriggerKind, TriggerMatch, scan};
pub use session::{FieldLimitReached, MAX_SELECTED_FIELDS, MentionSession, Mode, SessionChange};
