use super::commands::CommandTable;
use super::normalize::fold_turkish;

/// The character that opens the mention workflow.
pub const TRIGGER: char = '@';

/// How the text after `@` was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerKind {
    /// No usable trigger before the cursor.
    Inactive,
    /// A bare `@`: show the whole command menu.
    Menu,
    /// A recognised command, with any search text that follows it.
    Command { index: usize, query: String },
    /// Not a command yet, but some triggers contain the typed text.
    Filter { matches: Vec<usize> },
}

/// Result of scanning backwards from the cursor for `@`.
///
/// Produced fresh on every buffer change and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch {
    /// Byte offset of the `@`. Always `<= cursor`.
    pub trigger_offset: usize,
    /// Raw text between `@` and the cursor.
    pub prefix_text: String,
    pub kind: TriggerKind,
}

impl TriggerMatch {
    pub fn inactive() -> Self {
        Self {
            trigger_offset: 0,
            prefix_text: String::new(),
            kind: TriggerKind::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.kind, TriggerKind::Inactive)
    }
}

/// Finds and classifies the trigger span ending at `cursor`.
///
/// The nearest `@` on the cursor's line is used. A newline between `@` and
/// the cursor always invalidates. Other whitespace invalidates only until a
/// command keyword has been recognised; after that it is part of the query,
/// so `@uyetablo mehmet` searches for `mehmet`.
///
/// Classification order:
/// 1. empty prefix: [`TriggerKind::Menu`]
/// 2. the keyword is an unfinished longer trigger: [`TriggerKind::Filter`] while
///    it is still being typed, inactive once whitespace follows it
/// 3. a trigger is a prefix of the text, longest trigger first: [`TriggerKind::Command`]
/// 4. some triggers contain the text: [`TriggerKind::Filter`], otherwise inactive
pub fn scan(content: &str, cursor: usize, commands: &CommandTable) -> TriggerMatch {
    let Some(before) = content.get(..cursor) else {
        return TriggerMatch::inactive();
    };
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line = &before[line_start..];
    let Some(at) = line.rfind(TRIGGER) else {
        return TriggerMatch::inactive();
    };

    let trigger_offset = line_start + at;
    let prefix = &line[at + TRIGGER.len_utf8()..];
    let active = |kind| TriggerMatch {
        trigger_offset,
        prefix_text: prefix.to_string(),
        kind,
    };

    if prefix.is_empty() {
        return active(TriggerKind::Menu);
    }

    let word_end = prefix.find(char::is_whitespace).unwrap_or(prefix.len());
    let still_typing_word = word_end == prefix.len();
    let folded_word = fold_turkish(&prefix[..word_end]);

    if commands.exact(&folded_word).is_none() && commands.is_partial_trigger(&folded_word) {
        // `@uyet ali` is not `@uye` searching for "t ali".
        if !still_typing_word {
            return TriggerMatch::inactive();
        }
        return active(TriggerKind::Filter {
            matches: commands.filter(&folded_word),
        });
    }

    if let Some((index, rest)) = commands.longest_prefix_match(prefix) {
        return active(TriggerKind::Command {
            index,
            query: rest.trim_start().to_string(),
        });
    }

    if !still_typing_word {
        return TriggerMatch::inactive();
    }

    let matches = commands.filter(&folded_word);
    if matches.is_empty() {
        TriggerMatch::inactive()
    } else {
        active(TriggerKind::Filter { matches })
    }
}
