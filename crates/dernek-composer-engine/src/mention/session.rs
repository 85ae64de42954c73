use std::sync::Arc;

use thiserror::Error;

use super::commands::CommandTable;
use super::scanner::{TriggerKind, TriggerMatch};
use crate::editing::BufferEdit;
use crate::entities::{EntityRecord, FieldCatalog, FieldKey};
use crate::markup::serialize;

/// Upper bound on the number of columns in a generated table.
pub const MAX_SELECTED_FIELDS: usize = 5;

/// Interaction mode of the mention popup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Idle,
    CommandMenu,
    EntitySearch,
    FieldSelect,
}

/// Raised when a sixth field is toggled on. The selection is left unchanged.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("A table can have at most {limit} columns")]
pub struct FieldLimitReached {
    pub limit: usize,
}

/// What a transition changed, so the caller knows whether to (re)schedule a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    Unchanged,
    ModeChanged,
    QueryChanged,
}

/// State of one mention interaction, from `@` to commit or cancel.
///
/// Owned by the host and updated only through the transition methods below.
/// Whenever `mode` is `Idle` every other field is at its default, except the
/// offset of a cancelled trigger, which stays closed until the scanner moves
/// on to another `@` or loses it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MentionSession {
    mode: Mode,
    command: Option<usize>,
    multi_select: bool,
    query: String,
    candidates: Vec<Arc<EntityRecord>>,
    results_settled: bool,
    selected_entities: Vec<Arc<EntityRecord>>,
    selected_fields: Vec<FieldKey>,
    highlight_index: usize,
    trigger_offset: usize,
    span_end: usize,
    menu_matches: Vec<usize>,
    dismissed: Option<usize>,
}

impl MentionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == Mode::Idle
    }

    /// Index into the command table of the command that opened the search.
    pub fn command(&self) -> Option<usize> {
        self.command
    }

    pub fn multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn candidates(&self) -> &[Arc<EntityRecord>] {
        &self.candidates
    }

    pub fn selected_entities(&self) -> &[Arc<EntityRecord>] {
        &self.selected_entities
    }

    pub fn selected_fields(&self) -> &[FieldKey] {
        &self.selected_fields
    }

    pub fn highlight_index(&self) -> usize {
        self.highlight_index
    }

    pub fn trigger_offset(&self) -> usize {
        self.trigger_offset
    }

    /// End of the text the directive will replace.
    pub fn span_end(&self) -> usize {
        self.span_end
    }

    /// Offset of the `@` the user cancelled, if it is still in view.
    pub fn dismissed_trigger(&self) -> Option<usize> {
        self.dismissed
    }

    /// Command table indices currently listed in the menu.
    pub fn menu_matches(&self) -> &[usize] {
        &self.menu_matches
    }

    /// Entity whose values are previewed while choosing fields.
    pub fn preview_entity(&self) -> Option<&Arc<EntityRecord>> {
        match self.mode {
            Mode::FieldSelect => self.selected_entities.first(),
            _ => None,
        }
    }

    pub fn is_selected(&self, entity: &EntityRecord) -> bool {
        self.selected_entities.iter().any(|e| e.id == entity.id)
    }

    /// True when a search finished for the current query and found nothing.
    pub fn shows_no_results(&self) -> bool {
        self.mode == Mode::EntitySearch && self.results_settled && self.candidates.is_empty()
    }

    /// Length of the list the arrow keys move over in the current mode.
    pub fn active_list_len(&self, catalog: &FieldCatalog) -> usize {
        match self.mode {
            Mode::Idle => 0,
            Mode::CommandMenu => self.menu_matches.len(),
            Mode::EntitySearch => self.candidates.len(),
            Mode::FieldSelect => catalog.len(),
        }
    }

    /// Feeds a fresh scanner result for the buffer into the session.
    ///
    /// A match anchored at a different `@` than the tracked one means the
    /// user edited outside the trigger span: the session collapses to `Idle`
    /// and the new match is then considered on its own.
    pub fn on_buffer_changed(
        &mut self,
        found: &TriggerMatch,
        commands: &CommandTable,
        cursor: usize,
    ) -> SessionChange {
        if !found.is_active() {
            self.dismissed = None;
            return self.collapse();
        }
        if self.dismissed == Some(found.trigger_offset) {
            return SessionChange::Unchanged;
        }
        self.dismissed = None;

        if self.mode != Mode::Idle && found.trigger_offset != self.trigger_offset {
            log::debug!(
                "Trigger moved from {} to {}; resetting mention session",
                self.trigger_offset,
                found.trigger_offset
            );
            self.reset();
        }

        let change = match (self.mode, &found.kind) {
            (_, TriggerKind::Inactive) => self.collapse(),
            (Mode::Idle, _) => {
                self.trigger_offset = found.trigger_offset;
                self.open(&found.kind, commands)
            }
            (Mode::CommandMenu, _) => self.open(&found.kind, commands),
            (Mode::EntitySearch, TriggerKind::Command { index, query }) => {
                if Some(*index) != self.command && self.selected_entities.is_empty() {
                    self.enter_search(*index, query, commands)
                } else {
                    self.set_query(query)
                }
            }
            (Mode::EntitySearch, _) => {
                // The command keyword was edited away; back to the menu.
                self.clear_selection();
                self.open(&found.kind, commands)
            }
            (Mode::FieldSelect, _) => SessionChange::Unchanged,
        };

        if self.mode != Mode::Idle {
            self.span_end = cursor;
        }
        change
    }

    /// Menu pick: rewrites `@prefix` to `@<trigger> ` so the scanner keeps
    /// recognising the command, and enters the search right away.
    pub fn choose_command(&mut self, index: usize, commands: &CommandTable) -> Option<BufferEdit> {
        if self.mode != Mode::CommandMenu {
            return None;
        }
        let command = commands.get(index)?;
        let edit = BufferEdit::replace(
            self.trigger_offset..self.span_end,
            format!("@{} ", command.trigger),
        );
        self.enter_search(index, "", commands);
        self.span_end = edit.cursor_after;
        Some(edit)
    }

    /// Candidate pick (click, or Enter on the highlighted row).
    ///
    /// Single mode moves to field selection with the pick as the only
    /// entity. Multi mode toggles the pick and clears the query for the next
    /// search, keeping earlier picks.
    pub fn pick_candidate(&mut self, entity: Arc<EntityRecord>) -> SessionChange {
        if self.mode != Mode::EntitySearch {
            return SessionChange::Unchanged;
        }

        if !self.multi_select {
            self.selected_entities = vec![entity];
            self.enter_field_select();
            return SessionChange::ModeChanged;
        }

        if let Some(pos) = self.selected_entities.iter().position(|e| e.id == entity.id) {
            self.selected_entities.remove(pos);
        } else {
            self.selected_entities.push(entity);
        }
        self.query.clear();
        self.results_settled = false;
        self.highlight_index = 0;
        SessionChange::QueryChanged
    }

    /// Ends a multi selection. No-op unless something has been picked.
    pub fn finish_selection(&mut self) -> SessionChange {
        if self.mode != Mode::EntitySearch
            || !self.multi_select
            || self.selected_entities.is_empty()
        {
            return SessionChange::Unchanged;
        }
        self.enter_field_select();
        SessionChange::ModeChanged
    }

    /// Adds or removes a table column. Fields outside the catalog are ignored.
    pub fn toggle_field(
        &mut self,
        key: FieldKey,
        catalog: &FieldCatalog,
    ) -> Result<(), FieldLimitReached> {
        if self.mode != Mode::FieldSelect {
            return Ok(());
        }
        if !catalog.contains(key) {
            log::debug!("Ignoring toggle of field {key} outside the catalog");
            return Ok(());
        }

        if let Some(pos) = self.selected_fields.iter().position(|&k| k == key) {
            self.selected_fields.remove(pos);
        } else if self.selected_fields.len() >= MAX_SELECTED_FIELDS {
            return Err(FieldLimitReached {
                limit: MAX_SELECTED_FIELDS,
            });
        } else {
            self.selected_fields.push(key);
        }
        Ok(())
    }

    /// Serializes the selection and returns the edit replacing the trigger
    /// span. Resets the session. Needs at least one field and one entity.
    pub fn commit(&mut self, catalog: &FieldCatalog) -> Option<BufferEdit> {
        if self.mode != Mode::FieldSelect
            || self.selected_fields.is_empty()
            || self.selected_entities.is_empty()
        {
            return None;
        }
        let directive = serialize(&self.selected_entities, &self.selected_fields, catalog);
        let edit = BufferEdit::replace(self.trigger_offset..self.span_end, directive);
        log::debug!(
            "Committing table with {} rows and {} columns at {}",
            self.selected_entities.len(),
            self.selected_fields.len(),
            self.trigger_offset
        );
        self.reset();
        Some(edit)
    }

    /// Replaces the candidate list with a completed lookup's results.
    pub fn set_candidates(&mut self, candidates: Vec<Arc<EntityRecord>>) -> bool {
        if self.mode != Mode::EntitySearch {
            return false;
        }
        self.candidates = candidates;
        self.results_settled = true;
        self.highlight_index = 0;
        true
    }

    /// Updates the search text (from the buffer or the popup's search box).
    pub fn set_query(&mut self, query: &str) -> SessionChange {
        if self.mode != Mode::EntitySearch || self.query == query {
            return SessionChange::Unchanged;
        }
        self.query = query.to_string();
        self.results_settled = false;
        SessionChange::QueryChanged
    }

    pub fn highlight_next(&mut self, catalog: &FieldCatalog) {
        let len = self.active_list_len(catalog);
        if len > 0 {
            self.highlight_index = (self.highlight_index + 1).min(len - 1);
        }
    }

    pub fn highlight_previous(&mut self) {
        self.highlight_index = self.highlight_index.saturating_sub(1);
    }

    /// Escape, or focus leaving the editor and popup.
    ///
    /// The cancelled `@` is not reopened by further typing after it.
    pub fn cancel(&mut self) -> SessionChange {
        let offset = self.trigger_offset;
        let change = self.collapse();
        if change != SessionChange::Unchanged {
            self.dismissed = Some(offset);
        }
        change
    }

    fn collapse(&mut self) -> SessionChange {
        if self.mode == Mode::Idle {
            return SessionChange::Unchanged;
        }
        log::debug!("Mention session closed from {:?}", self.mode);
        self.reset();
        SessionChange::ModeChanged
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Handles a match while in `Idle` or `CommandMenu`.
    fn open(&mut self, kind: &TriggerKind, commands: &CommandTable) -> SessionChange {
        match kind {
            TriggerKind::Inactive => self.collapse(),
            TriggerKind::Menu => self.show_menu((0..commands.len()).collect()),
            TriggerKind::Filter { matches } => self.show_menu(matches.clone()),
            TriggerKind::Command { index, query } => self.enter_search(*index, query, commands),
        }
    }

    fn show_menu(&mut self, matches: Vec<usize>) -> SessionChange {
        let was = self.mode;
        self.mode = Mode::CommandMenu;
        if self.menu_matches != matches {
            self.highlight_index = 0;
        }
        self.menu_matches = matches;
        if was == Mode::CommandMenu {
            SessionChange::Unchanged
        } else {
            SessionChange::ModeChanged
        }
    }

    fn enter_search(&mut self, index: usize, query: &str, commands: &CommandTable) -> SessionChange {
        let Some(command) = commands.get(index) else {
            return self.collapse();
        };
        log::debug!(
            "Entering entity search for @{} (multi: {})",
            command.trigger,
            command.multi_select
        );
        self.mode = Mode::EntitySearch;
        self.command = Some(index);
        self.multi_select = command.multi_select;
        self.query = query.to_string();
        self.candidates.clear();
        self.results_settled = false;
        self.menu_matches.clear();
        self.highlight_index = 0;
        SessionChange::ModeChanged
    }

    fn enter_field_select(&mut self) {
        self.mode = Mode::FieldSelect;
        self.candidates.clear();
        self.results_settled = false;
        self.highlight_index = 0;
    }

    fn clear_selection(&mut self) {
        self.command = None;
        self.multi_select = false;
        self.query.clear();
        self.candidates.clear();
        self.results_settled = false;
        self.selected_entities.clear();
        self.selected_fields.clear();
    }
}
