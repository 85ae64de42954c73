use super::normalize::fold_turkish;

/// A trigger keyword typed after `@`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Keyword in folded form (lowercase, no diacritics).
    pub trigger: &'static str,
    /// Label shown in the command menu.
    pub label: &'static str,
    /// Whether more than one entity may be selected.
    pub multi_select: bool,
}

impl Command {
    pub const MEMBER: Command = Command {
        trigger: "uye",
        label: "Üye",
        multi_select: false,
    };

    pub const MEMBER_TABLE: Command = Command {
        trigger: "uyetablo",
        label: "Üye tablosu",
        multi_select: true,
    };
}

/// Ordered command table, longest trigger first.
///
/// The ordering is what makes prefix matching safe: `uyetablo` is always
/// tried before `uye`, so typing the longer keyword is never read as the
/// shorter one followed by search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    commands: Vec<Command>,
}

impl CommandTable {
    pub fn new(mut commands: Vec<Command>) -> Self {
        // Stable: commands of equal length keep their given order.
        commands.sort_by(|a, b| b.trigger.len().cmp(&a.trigger.len()));
        Self { commands }
    }

    pub fn builtin() -> Self {
        Self::new(vec![Command::MEMBER, Command::MEMBER_TABLE])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    /// Matches the start of `raw` (unfolded text typed after `@`) against the
    /// table, longest trigger first. Returns the command index and the
    /// unfolded remainder after the keyword.
    pub fn longest_prefix_match<'a>(&self, raw: &'a str) -> Option<(usize, &'a str)> {
        self.commands
            .iter()
            .enumerate()
            .find_map(|(index, command)| strip_trigger(raw, command.trigger).map(|rest| (index, rest)))
    }

    /// Index of the command whose trigger equals `folded` exactly.
    pub fn exact(&self, folded: &str) -> Option<usize> {
        self.commands.iter().position(|c| c.trigger == folded)
    }

    /// Indices of commands whose trigger contains `folded` as a substring.
    /// An empty filter keeps every command.
    pub fn filter(&self, folded: &str) -> Vec<usize> {
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, c)| c.trigger.contains(folded))
            .map(|(index, _)| index)
            .collect()
    }

    /// True if `folded` is a strict prefix of some trigger.
    pub fn is_partial_trigger(&self, folded: &str) -> bool {
        self.commands
            .iter()
            .any(|c| c.trigger.len() > folded.len() && c.trigger.starts_with(folded))
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Folds `raw` one character at a time until it spells `trigger`; returns the
/// unfolded rest, or `None` as soon as the folded text diverges.
fn strip_trigger<'a>(raw: &'a str, trigger: &str) -> Option<&'a str> {
    let mut folded = String::with_capacity(trigger.len());
    for (i, ch) in raw.char_indices() {
        if folded == trigger {
            return Some(&raw[i..]);
        }
        let mut buf = [0u8; 4];
        folded.push_str(&fold_turkish(ch.encode_utf8(&mut buf)));
        if !trigger.starts_with(folded.as_str()) {
            return None;
        }
    }
    (folded == trigger).then_some("")
}
