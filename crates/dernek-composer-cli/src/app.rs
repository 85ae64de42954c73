use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dernek_composer_engine::{
    Composer, ComposerSettings, FieldCatalog, Key, MemoryGateway, Mode, Notice, Outcome,
    StyleKind, TextBuffer, style_edit,
};

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub buffer: TextBuffer,
    pub composer: Composer<MemoryGateway>,
    /// Selection anchor for style commands, set with Ctrl+Space.
    pub mark: Option<usize>,
    /// Popup search box, focused with Ctrl+F during a search.
    pub search_input: Option<String>,
    pub status: String,
}

impl App {
    pub fn new(
        text: &str,
        gateway: MemoryGateway,
        catalog: FieldCatalog,
        settings: ComposerSettings,
    ) -> Self {
        let mut app = Self {
            buffer: TextBuffer::new(text),
            composer: Composer::with_config(Arc::new(gateway), catalog, settings),
            mark: None,
            search_input: None,
            status: String::new(),
        };
        app.buffer_changed(Instant::now());
        app
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl {
            return self.handle_control(key.code, now);
        }

        if self.search_input.is_some() {
            self.handle_search_input(key.code, now);
            return Flow::Continue;
        }

        if let Some(popup_key) = popup_key(key.code) {
            let outcome = self.composer.on_key_down(popup_key, now);
            if outcome.consumed {
                self.apply_outcome(outcome, now);
                return Flow::Continue;
            }
        }

        match key.code {
            KeyCode::Char(c) => {
                self.buffer.insert(c.encode_utf8(&mut [0; 4]));
            }
            KeyCode::Enter => self.buffer.insert("\n"),
            KeyCode::Backspace => self.buffer.delete_backward(),
            KeyCode::Left => self.buffer.move_left(),
            KeyCode::Right => self.buffer.move_right(),
            _ => return Flow::Continue,
        }
        self.buffer_changed(now);
        Flow::Continue
    }

    fn handle_control(&mut self, code: KeyCode, now: Instant) -> Flow {
        match code {
            KeyCode::Char('q') | KeyCode::Char('c') => return Flow::Quit,
            KeyCode::Char(' ') => {
                self.mark = Some(self.buffer.cursor());
                self.status = "Seçim başlangıcı işaretlendi".to_string();
            }
            KeyCode::Char('b') => self.apply_style(StyleKind::Bold, now),
            KeyCode::Char('i') => self.apply_style(StyleKind::Italic, now),
            KeyCode::Char('u') => self.apply_style(StyleKind::Underline, now),
            KeyCode::Char('l') => self.apply_style(StyleKind::Size(18), now),
            KeyCode::Char('f') if self.composer.session().mode() == Mode::EntitySearch => {
                self.search_input = Some(self.composer.session().query().to_string());
            }
            KeyCode::Char('s') => {
                let outcome = self.composer.on_commit();
                self.apply_outcome(outcome, now);
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_search_input(&mut self, code: KeyCode, now: Instant) {
        let Some(input) = self.search_input.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc | KeyCode::Enter => {
                self.search_input = None;
                return;
            }
            _ => return,
        }
        let query = input.clone();
        self.composer.on_query_input(&query, now);
    }

    fn apply_style(&mut self, kind: StyleKind, now: Instant) {
        let Some(mark) = self.mark.take() else {
            self.status = "Önce Ctrl+Space ile seçim başlatın".to_string();
            return;
        };
        let cursor = self.buffer.cursor();
        let selection = mark.min(cursor)..mark.max(cursor);
        match style_edit(&self.buffer.text(), selection, kind) {
            Some(edit) => {
                self.buffer.apply(&edit);
                self.buffer_changed(now);
                self.status.clear();
            }
            None => self.status = "Seçim biçimlendirilemedi".to_string(),
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome, now: Instant) {
        if let Some(Notice::FieldLimitReached(limit)) = &outcome.notice {
            self.status = limit.to_string();
        } else {
            self.status.clear();
        }
        if let Some(edit) = outcome.edit {
            self.buffer.apply(&edit);
            self.buffer_changed(now);
        }
        if self.composer.session().mode() != Mode::EntitySearch {
            self.search_input = None;
        }
    }

    fn buffer_changed(&mut self, now: Instant) {
        let content = self.buffer.text();
        self.composer
            .on_buffer_changed(&content, self.buffer.cursor(), now);
        if self.composer.session().mode() != Mode::EntitySearch {
            self.search_input = None;
        }
    }
}

fn popup_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Tab => Some(Key::Tab),
        _ => None,
    }
}
