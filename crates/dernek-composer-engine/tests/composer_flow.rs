use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dernek_composer_engine::{
    Composer, EntityGateway, EntityRecord, FieldKey, Key, LookupError, MemoryGateway, Mode,
    TextBuffer,
};
use pretty_assertions::assert_eq;

fn members() -> MemoryGateway {
    MemoryGateway::new([
        EntityRecord::new("1")
            .with(FieldKey::MemberNo, "1001")
            .with(FieldKey::FirstName, "Ahmet")
            .with(FieldKey::LastName, "Yılmaz"),
        EntityRecord::new("2")
            .with(FieldKey::MemberNo, "1002")
            .with(FieldKey::FirstName, "Mehmet")
            .with(FieldKey::LastName, "Işık"),
        EntityRecord::new("3")
            .with(FieldKey::MemberNo, "1003")
            .with(FieldKey::FirstName, "Ayşe")
            .with(FieldKey::LastName, "Mehmetoğlu"),
    ])
}

/// Minimal host: a buffer plus the composer, with a virtual clock.
struct Host<G> {
    buffer: TextBuffer,
    composer: Composer<G>,
    now: Instant,
}

impl<G: EntityGateway + Send + Sync + 'static> Host<G> {
    fn new(gateway: G) -> Self {
        Self {
            buffer: TextBuffer::new(""),
            composer: Composer::new(Arc::new(gateway)),
            now: Instant::now(),
        }
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.buffer.insert(ch.encode_utf8(&mut [0; 4]));
            self.now += Duration::from_millis(50);
            self.notify();
        }
    }

    fn notify(&mut self) {
        let content = self.buffer.text();
        self.composer
            .on_buffer_changed(&content, self.buffer.cursor(), self.now);
    }

    fn key(&mut self, key: Key) {
        let outcome = self.composer.on_key_down(key, self.now);
        if let Some(edit) = outcome.edit {
            self.buffer.apply(&edit);
            self.notify();
        }
    }

    /// Lets the debounce expire and runs the resulting lookup to completion.
    async fn settle(&mut self) -> bool {
        self.now += self.composer.settings().debounce;
        let Some(request) = self.composer.poll_lookup(self.now) else {
            return false;
        };
        let response = self.composer.lookup(request).await;
        self.composer.on_lookup_completed(response)
    }

    fn candidate_ids(&self) -> Vec<String> {
        self.composer
            .session()
            .candidates()
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }
}

#[tokio::test]
async fn single_member_mention_commits_table() {
    let mut host = Host::new(members());
    host.type_text("Davetli: @uye");
    assert_eq!(host.composer.session().mode(), Mode::EntitySearch);
    assert!(!host.composer.session().multi_select());
    assert_eq!(host.composer.session().query(), "");

    host.type_text(" ahm");
    assert!(host.settle().await);
    assert_eq!(host.candidate_ids(), vec!["1"]);

    host.key(Key::Enter);
    assert_eq!(host.composer.session().mode(), Mode::FieldSelect);

    host.composer.on_field_toggled(FieldKey::FirstName).unwrap();
    host.composer.on_field_toggled(FieldKey::LastName).unwrap();
    host.key(Key::Tab);

    assert_eq!(
        host.buffer.text(),
        "Davetli: [[TABLO:COLS=Ad|Soyad # ROWS=Ahmet|Yılmaz]]"
    );
    assert_eq!(host.buffer.cursor(), host.buffer.len());
    assert!(host.composer.session().is_idle());
}

#[tokio::test]
async fn multi_member_table_keeps_picks_across_searches() {
    let mut host = Host::new(members());
    host.type_text("@uyetablo mehmet");
    assert!(host.composer.session().multi_select());
    assert_eq!(host.composer.session().query(), "mehmet");

    assert!(host.settle().await);
    assert_eq!(host.candidate_ids(), vec!["2", "3"]);

    let ayse = host.composer.session().candidates()[1].clone();
    host.composer.on_candidate_picked(ayse, host.now);
    assert_eq!(host.composer.session().query(), "");

    host.composer.on_query_input("ahmet", host.now);
    assert!(host.settle().await);
    host.key(Key::Enter);

    let picked: Vec<_> = host
        .composer
        .session()
        .selected_entities()
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(picked, vec!["3", "1"]);

    host.key(Key::Tab);
    assert_eq!(host.composer.session().mode(), Mode::FieldSelect);

    host.composer.on_field_toggled(FieldKey::MemberNo).unwrap();
    host.composer.on_field_toggled(FieldKey::FirstName).unwrap();
    let outcome = host.composer.on_commit();
    host.buffer.apply(&outcome.edit.unwrap());

    assert_eq!(
        host.buffer.text(),
        "[[TABLO:COLS=Üye No|Ad # ROWS=1003|Ayşe;1001|Ahmet]]"
    );
}

#[tokio::test]
async fn menu_pick_rewrites_prefix() {
    let mut host = Host::new(members());
    host.type_text("Not: @tab");
    assert_eq!(host.composer.session().mode(), Mode::CommandMenu);

    host.key(Key::Enter);
    assert_eq!(host.buffer.text(), "Not: @uyetablo ");
    assert_eq!(host.composer.session().mode(), Mode::EntitySearch);
    assert!(host.composer.session().multi_select());
}

#[tokio::test]
async fn no_results_keeps_popup_open() {
    let mut host = Host::new(members());
    host.type_text("@uye zzz");
    assert!(host.settle().await);
    assert!(host.composer.session().shows_no_results());
    assert_eq!(host.composer.session().mode(), Mode::EntitySearch);
}

#[tokio::test]
async fn escape_cancels_and_drops_late_response() {
    let mut host = Host::new(members());
    host.type_text("@uye a");
    host.now += host.composer.settings().debounce;
    let request = host.composer.poll_lookup(host.now).unwrap();
    let pending = host.composer.lookup(request);

    host.key(Key::Escape);
    assert!(host.composer.session().is_idle());
    assert!(!host.composer.on_lookup_completed(pending.await));
    assert!(host.composer.session().candidates().is_empty());
}

#[tokio::test]
async fn late_response_does_not_leak_into_next_mention() {
    let mut host = Host::new(members());
    host.type_text("@uye a");
    host.now += host.composer.settings().debounce;
    let request = host.composer.poll_lookup(host.now).unwrap();
    let pending = host.composer.lookup(request);

    host.key(Key::Escape);
    host.type_text("\n@uyetablo zz");
    assert_eq!(host.composer.session().query(), "zz");

    assert!(!host.composer.on_lookup_completed(pending.await));
    assert!(host.candidate_ids().is_empty());
    assert!(host.settle().await);
    assert!(host.composer.session().shows_no_results());
}

#[tokio::test]
async fn escape_then_keep_typing_leaves_popup_closed() {
    let mut host = Host::new(members());
    host.type_text("Sayın @uye");
    host.key(Key::Escape);

    host.type_text(" ile toplantı yapıldı");
    assert!(host.composer.session().is_idle());
    assert!(!host.settle().await);

    host.type_text(" @uye");
    assert_eq!(host.composer.session().mode(), Mode::EntitySearch);
}

#[tokio::test]
async fn spawned_lookup_runs_on_runtime() {
    let mut host = Host::new(members());
    host.type_text("@uye yıl");
    host.now += host.composer.settings().debounce;
    let request = host.composer.poll_lookup(host.now).unwrap();

    let response = tokio::spawn(host.composer.lookup(request)).await.unwrap();
    assert!(host.composer.on_lookup_completed(response));
    assert_eq!(host.candidate_ids(), vec!["1"]);
}

struct Unreachable;

impl EntityGateway for Unreachable {
    fn search(
        &self,
        _query: &str,
        _limit: usize,
    ) -> impl Future<Output = Result<Vec<Arc<EntityRecord>>, LookupError>> + Send {
        async { Err(LookupError::Unavailable("connection refused".into())) }
    }
}

#[tokio::test]
async fn gateway_failure_becomes_empty_results() {
    let mut host = Host::new(Unreachable);
    host.type_text("@uye ali");
    assert!(host.settle().await);
    assert!(host.composer.session().candidates().is_empty());
    assert!(host.composer.session().shows_no_results());
}

#[tokio::test]
async fn editing_elsewhere_resets_session() {
    let mut host = Host::new(members());
    host.type_text("@uye ali");
    host.buffer.set_cursor(0);
    host.type_text("x\n");
    assert!(host.composer.session().is_idle());
    assert!(!host.settle().await);
}
