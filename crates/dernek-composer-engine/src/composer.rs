//! Host editor surface.
//!
//! The host calls into [`Composer`] from its single UI event loop. All
//! transitions run synchronously there. The one suspending operation, the
//! entity search, is split so the host decides where it runs:
//!
//! 1. [`Composer::poll_lookup`] on every tick returns a [`LookupRequest`] once
//!    the debounce deadline has passed.
//! 2. [`Composer::lookup`] turns it into a `Send + 'static` future the host
//!    can spawn.
//! 3. [`Composer::on_lookup_completed`] applies the response back on the UI
//!    loop, or drops it when the session has moved on since the request:
//!    a newer request, a changed query, a cancel or a commit.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::editing::BufferEdit;
use crate::entities::{
    DEFAULT_SEARCH_DEBOUNCE, DEFAULT_SEARCH_LIMIT, Debouncer, EntityGateway, EntityRecord,
    FieldCatalog, FieldKey, Generation,
};
use crate::markup::{MarkupToken, parse};
use crate::mention::scanner::scan;
use crate::mention::{CommandTable, FieldLimitReached, MentionSession, Mode, SessionChange};

/// Search tuning taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerSettings {
    pub debounce: Duration,
    pub search_limit: usize,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_SEARCH_DEBOUNCE,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// Keys the composer reacts to. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Tab,
    Other,
}

/// Something the host should show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    FieldLimitReached(FieldLimitReached),
}

/// Result of a key press or commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Edit the host must apply to its buffer.
    pub edit: Option<BufferEdit>,
    pub notice: Option<Notice>,
    /// Whether the key was used by the popup and should not reach the editor.
    pub consumed: bool,
}

impl Outcome {
    fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }

    fn with_edit(edit: Option<BufferEdit>) -> Self {
        Self {
            edit,
            consumed: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub generation: Generation,
    pub query: String,
    pub limit: usize,
}

#[derive(Debug, Clone)]
pub struct LookupResponse {
    pub generation: Generation,
    pub results: Vec<Arc<EntityRecord>>,
}

/// Mention engine bound to one editor and one entity gateway.
pub struct Composer<G> {
    session: MentionSession,
    commands: CommandTable,
    catalog: FieldCatalog,
    settings: ComposerSettings,
    debouncer: Debouncer,
    latest: Generation,
    gateway: Arc<G>,
}

impl<G: EntityGateway> Composer<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_config(
            gateway,
            FieldCatalog::default_members(),
            ComposerSettings::default(),
        )
    }

    pub fn with_config(gateway: Arc<G>, catalog: FieldCatalog, settings: ComposerSettings) -> Self {
        Self {
            session: MentionSession::new(),
            commands: CommandTable::builtin(),
            catalog,
            settings,
            debouncer: Debouncer::new(settings.debounce),
            latest: Generation::default(),
            gateway,
        }
    }

    pub fn session(&self) -> &MentionSession {
        &self.session
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> ComposerSettings {
        self.settings
    }

    /// Generation a lookup response must carry to be applied.
    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    /// When the host should next call [`Self::poll_lookup`], if at all.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Pure render of the document for the preview pane.
    pub fn render(&self, content: &str) -> Vec<MarkupToken> {
        parse(content)
    }

    pub fn on_buffer_changed(&mut self, content: &str, cursor: usize, now: Instant) {
        let found = scan(content, cursor, &self.commands);
        let change = self.session.on_buffer_changed(&found, &self.commands, cursor);
        self.after_change(change, now);
    }

    pub fn on_key_down(&mut self, key: Key, now: Instant) -> Outcome {
        let mode = self.session.mode();
        if mode == Mode::Idle {
            return Outcome::default();
        }

        match key {
            Key::ArrowDown => {
                self.session.highlight_next(&self.catalog);
                Outcome::consumed()
            }
            Key::ArrowUp => {
                self.session.highlight_previous();
                Outcome::consumed()
            }
            Key::Escape => {
                let change = self.session.cancel();
                self.after_change(change, now);
                Outcome::consumed()
            }
            Key::Enter => self.enter_highlighted(now),
            Key::Tab => match mode {
                Mode::EntitySearch => {
                    let change = self.session.finish_selection();
                    self.after_change(change, now);
                    Outcome::consumed()
                }
                Mode::FieldSelect => self.on_commit(),
                _ => Outcome::default(),
            },
            Key::Other => Outcome::default(),
        }
    }

    pub fn on_candidate_picked(&mut self, entity: Arc<EntityRecord>, now: Instant) {
        let change = self.session.pick_candidate(entity);
        self.after_change(change, now);
    }

    pub fn on_field_toggled(&mut self, key: FieldKey) -> Result<(), FieldLimitReached> {
        self.session.toggle_field(key, &self.catalog)
    }

    pub fn on_finish_selection(&mut self, now: Instant) {
        let change = self.session.finish_selection();
        self.after_change(change, now);
    }

    /// Text typed into the popup's own search box.
    pub fn on_query_input(&mut self, query: &str, now: Instant) {
        let change = self.session.set_query(query);
        self.after_change(change, now);
    }

    pub fn on_commit(&mut self) -> Outcome {
        let edit = self.session.commit(&self.catalog);
        if edit.is_some() {
            self.debouncer.cancel();
            self.invalidate_lookups();
        }
        Outcome::with_edit(edit)
    }

    pub fn on_focus_lost(&mut self) {
        if self.session.cancel() != SessionChange::Unchanged {
            self.debouncer.cancel();
            self.invalidate_lookups();
        }
    }

    /// Issues a lookup once the debounce deadline has passed.
    pub fn poll_lookup(&mut self, now: Instant) -> Option<LookupRequest> {
        if !self.debouncer.take_due(now) || self.session.mode() != Mode::EntitySearch {
            return None;
        }
        self.latest = self.latest.next();
        log::debug!(
            "Issuing lookup {:?} for {:?}",
            self.latest,
            self.session.query()
        );
        Some(LookupRequest {
            generation: self.latest,
            query: self.session.query().to_string(),
            limit: self.settings.search_limit,
        })
    }

    /// Runs a request against the gateway. Failures are logged and become
    /// an empty result list.
    pub fn lookup(&self, request: LookupRequest) -> impl Future<Output = LookupResponse> + Send + 'static
    where
        G: Send + Sync + 'static,
    {
        let gateway = Arc::clone(&self.gateway);
        async move {
            let results = match gateway.search(&request.query, request.limit).await {
                Ok(results) => results,
                Err(err) => {
                    log::warn!("Lookup for {:?} failed: {err}", request.query);
                    Vec::new()
                }
            };
            LookupResponse {
                generation: request.generation,
                results,
            }
        }
    }

    /// Applies a finished lookup. Returns false when the response was stale.
    pub fn on_lookup_completed(&mut self, response: LookupResponse) -> bool {
        if response.generation != self.latest {
            log::debug!(
                "Discarding lookup {:?}; latest is {:?}",
                response.generation,
                self.latest
            );
            return false;
        }
        if !self.session.set_candidates(response.results) {
            log::debug!("Discarding lookup {:?}; search closed", response.generation);
            return false;
        }
        true
    }

    fn enter_highlighted(&mut self, now: Instant) -> Outcome {
        let index = self.session.highlight_index();
        match self.session.mode() {
            Mode::Idle => Outcome::default(),
            Mode::CommandMenu => {
                let Some(&command) = self.session.menu_matches().get(index) else {
                    return Outcome::consumed();
                };
                let edit = self.session.choose_command(command, &self.commands);
                self.after_change(SessionChange::ModeChanged, now);
                Outcome::with_edit(edit)
            }
            Mode::EntitySearch => {
                if let Some(entity) = self.session.candidates().get(index).cloned() {
                    self.on_candidate_picked(entity, now);
                }
                Outcome::consumed()
            }
            Mode::FieldSelect => {
                let Some(key) = self.catalog.get(index).map(|entry| entry.key) else {
                    return Outcome::consumed();
                };
                match self.session.toggle_field(key, &self.catalog) {
                    Ok(()) => Outcome::consumed(),
                    Err(limit) => Outcome {
                        notice: Some(Notice::FieldLimitReached(limit)),
                        ..Outcome::consumed()
                    },
                }
            }
        }
    }

    /// Keeps the debouncer and the accepted generation in step with the session.
    fn after_change(&mut self, change: SessionChange, now: Instant) {
        if change != SessionChange::Unchanged {
            self.invalidate_lookups();
        }
        match self.session.mode() {
            Mode::EntitySearch if change != SessionChange::Unchanged => {
                self.debouncer.schedule(now);
            }
            Mode::EntitySearch => {}
            _ => self.debouncer.cancel(),
        }
    }

    /// Any lookup already issued was for a query or session that is gone.
    fn invalidate_lookups(&mut self) {
        self.latest = self.latest.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MemoryGateway;
    use pretty_assertions::assert_eq;

    fn composer() -> Composer<MemoryGateway> {
        let gateway = MemoryGateway::new([
            EntityRecord::new("1")
                .with(FieldKey::FirstName, "Ahmet")
                .with(FieldKey::LastName, "Yılmaz"),
            EntityRecord::new("2")
                .with(FieldKey::FirstName, "Mehmet")
                .with(FieldKey::LastName, "Öz"),
        ]);
        Composer::new(Arc::new(gateway))
    }

    fn type_all(composer: &mut Composer<MemoryGateway>, content: &str, now: Instant) {
        composer.on_buffer_changed(content, content.len(), now);
    }

    #[test]
    fn keystrokes_within_quiet_period_issue_one_lookup() {
        let mut composer = composer();
        let t0 = Instant::now();
        let step = Duration::from_millis(100);
        for (i, content) in ["@uye ", "@uye m", "@uye me", "@uye meh"].iter().enumerate() {
            type_all(&mut composer, content, t0 + step * i as u32);
            assert_eq!(composer.poll_lookup(t0 + step * i as u32), None);
        }

        let due = t0 + step * 3 + composer.settings().debounce;
        let request = composer.poll_lookup(due).unwrap();
        assert_eq!(request.query, "meh");
        assert_eq!(request.generation, composer.latest_generation());
        assert_eq!(composer.poll_lookup(due + step), None);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut composer = composer();
        let t0 = Instant::now();
        let debounce = composer.settings().debounce;

        type_all(&mut composer, "@uye a", t0);
        let first = composer.poll_lookup(t0 + debounce).unwrap();
        type_all(&mut composer, "@uye ah", t0 + debounce);
        let second = composer.poll_lookup(t0 + debounce * 2).unwrap();

        let fresh = vec![Arc::new(EntityRecord::new("1"))];
        assert!(composer.on_lookup_completed(LookupResponse {
            generation: second.generation,
            results: fresh.clone(),
        }));
        assert!(!composer.on_lookup_completed(LookupResponse {
            generation: first.generation,
            results: vec![],
        }));
        assert_eq!(composer.session().candidates(), fresh.as_slice());
    }

    #[test]
    fn response_after_cancel_is_discarded() {
        let mut composer = composer();
        let t0 = Instant::now();
        type_all(&mut composer, "@uye a", t0);
        let request = composer.poll_lookup(t0 + composer.settings().debounce).unwrap();
        composer.on_key_down(Key::Escape, t0);

        assert!(!composer.on_lookup_completed(LookupResponse {
            generation: request.generation,
            results: vec![Arc::new(EntityRecord::new("1"))],
        }));
        assert!(composer.session().is_idle());
    }

    #[test]
    fn response_from_cancelled_session_skips_the_next_one() {
        let mut composer = composer();
        let t0 = Instant::now();
        let debounce = composer.settings().debounce;
        type_all(&mut composer, "@uye a", t0);
        let old = composer.poll_lookup(t0 + debounce).unwrap();
        composer.on_key_down(Key::Escape, t0 + debounce);

        type_all(&mut composer, "@uye a\n@uyetablo zz", t0 + debounce);
        assert_eq!(composer.session().mode(), Mode::EntitySearch);
        assert!(!composer.on_lookup_completed(LookupResponse {
            generation: old.generation,
            results: vec![Arc::new(EntityRecord::new("stale"))],
        }));
        assert!(composer.session().candidates().is_empty());
        assert!(!composer.session().shows_no_results());
    }

    #[test]
    fn response_for_an_edited_query_is_discarded() {
        let mut composer = composer();
        let t0 = Instant::now();
        let debounce = composer.settings().debounce;
        type_all(&mut composer, "@uye a", t0);
        let request = composer.poll_lookup(t0 + debounce).unwrap();
        type_all(&mut composer, "@uye ab", t0 + debounce);

        assert!(!composer.on_lookup_completed(LookupResponse {
            generation: request.generation,
            results: vec![],
        }));
        assert!(!composer.session().shows_no_results());
        assert_eq!(composer.poll_lookup(t0 + debounce * 2).unwrap().query, "ab");
    }

    #[test]
    fn response_after_commit_is_discarded() {
        let mut composer = composer();
        let t0 = Instant::now();
        let debounce = composer.settings().debounce;
        type_all(&mut composer, "@uye ahm", t0);
        let request = composer.poll_lookup(t0 + debounce).unwrap();
        composer.on_candidate_picked(Arc::new(EntityRecord::new("1")), t0);
        composer.on_field_toggled(FieldKey::FirstName).unwrap();
        assert!(composer.on_commit().edit.is_some());

        type_all(&mut composer, "[[TABLO:COLS=Ad # ROWS=-]] @uye", t0);
        assert!(!composer.on_lookup_completed(LookupResponse {
            generation: request.generation,
            results: vec![Arc::new(EntityRecord::new("2"))],
        }));
    }

    #[test]
    fn escape_then_typing_stays_closed() {
        let mut composer = composer();
        let now = Instant::now();
        type_all(&mut composer, "Sayın @uye", now);
        composer.on_key_down(Key::Escape, now);

        type_all(&mut composer, "Sayın @uye ile toplantı yapıldı", now);
        assert!(composer.session().is_idle());
        assert_eq!(composer.next_deadline(), None);
        assert_eq!(composer.poll_lookup(now + Duration::from_secs(5)), None);
    }

    #[test]
    fn keys_are_ignored_when_idle() {
        let mut composer = composer();
        let outcome = composer.on_key_down(Key::Enter, Instant::now());
        assert_eq!(outcome, Outcome::default());
        assert!(composer.session().is_idle());
    }

    #[test]
    fn enter_in_menu_chooses_highlighted_command() {
        let mut composer = composer();
        let now = Instant::now();
        type_all(&mut composer, "@", now);
        composer.on_key_down(Key::ArrowDown, now);

        let outcome = composer.on_key_down(Key::Enter, now);
        let edit = outcome.edit.unwrap();
        assert_eq!(edit.text, "@uye ");
        assert_eq!(composer.session().mode(), Mode::EntitySearch);
        assert!(!composer.session().multi_select());
        assert!(composer.next_deadline().is_some());
    }

    #[test]
    fn enter_in_field_select_reports_limit() {
        let mut composer = composer();
        let now = Instant::now();
        type_all(&mut composer, "@uye", now);
        composer.on_candidate_picked(Arc::new(EntityRecord::new("1")), now);

        for key in &FieldKey::ALL[..5] {
            composer.on_field_toggled(*key).unwrap();
        }
        for _ in 0..5 {
            composer.on_key_down(Key::ArrowDown, now);
        }
        let outcome = composer.on_key_down(Key::Enter, now);
        assert_eq!(
            outcome.notice,
            Some(Notice::FieldLimitReached(FieldLimitReached { limit: 5 }))
        );
        assert_eq!(composer.session().selected_fields().len(), 5);
    }

    #[test]
    fn leaving_search_cancels_pending_lookup() {
        let mut composer = composer();
        let now = Instant::now();
        type_all(&mut composer, "@uye a", now);
        assert!(composer.next_deadline().is_some());
        composer.on_focus_lost();
        assert_eq!(composer.next_deadline(), None);
        assert_eq!(composer.poll_lookup(now + Duration::from_secs(5)), None);
    }
}
