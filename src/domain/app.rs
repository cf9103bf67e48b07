//! Application state and keyboard handling.
//!
//! Key handling is pure: it mutates local state and returns an [`Action`]
//! describing any network work for the main loop to dispatch. This keeps the
//! whole interaction model testable without a terminal or a server.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::{LotListItem, LotSummary};

use super::detail::Detail;
use super::qr::QrArtifact;
use super::search::Search;

/// How long the transient "Copied!" label stays up.
const COPIED_LABEL_TTL: Duration = Duration::from_secs(1);

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    LotInput,
    SearchInput,
    Results,
    Chain,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::LotInput => Focus::SearchInput,
            Focus::SearchInput => Focus::Results,
            Focus::Results => Focus::Chain,
            Focus::Chain => Focus::LotInput,
        }
    }

    fn is_text_input(self) -> bool {
        matches!(self, Focus::LotInput | Focus::SearchInput)
    }
}

/// Network work requested by a keystroke; dispatched by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    LoadLot(String),
    /// Fetch the current listing page (query/page/page_size read from state).
    Search,
    SeedOne,
    SeedMany,
    ShowQr(String),
    /// Copy a full hash value to the system clipboard.
    Copy(String),
}

/// Top-level application model.
pub struct App {
    pub focus: Focus,
    /// Lot-id input buffer.
    pub input: String,
    pub detail: Detail,
    pub search: Search,
    /// Open QR modal, if any. The handle owns the transient file reference.
    pub qr: Option<QrArtifact>,
    pub qr_loading: bool,
    /// Seed trigger disabled while a seed call is in flight.
    pub seeding: bool,
    /// One user-facing notification at a time.
    pub notice: Option<String>,
    pub help_open: bool,
    /// Chain navigation: highlighted card and which cards are expanded.
    pub selected_card: usize,
    pub expanded_cards: HashSet<usize>,
    copied_at: Option<Instant>,
    should_quit: bool,
}

impl App {
    pub fn new(page_size: u32) -> Self {
        Self {
            focus: Focus::LotInput,
            input: String::new(),
            detail: Detail::default(),
            search: Search::new(page_size),
            qr: None,
            qr_loading: false,
            seeding: false,
            notice: None,
            help_open: false,
            selected_card: 0,
            expanded_cards: HashSet::new(),
            copied_at: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    /// Whether the "Copied!" label should currently show.
    pub fn copied_label_active(&self) -> bool {
        self.copied_at
            .map(|at| at.elapsed() < COPIED_LABEL_TTL)
            .unwrap_or(false)
    }

    pub fn mark_copied(&mut self) {
        self.copied_at = Some(Instant::now());
    }

    /// Called from the main loop tick; reverts the transient label.
    pub fn tick(&mut self) {
        if let Some(at) = self.copied_at {
            if at.elapsed() >= COPIED_LABEL_TTL {
                self.copied_at = None;
            }
        }
    }

    // === apply methods (called by dispatch tasks under the app lock) ===

    /// Apply a successful detail fetch. Last completion wins the visible
    /// state when loads raced.
    pub fn apply_lot_loaded(&mut self, summary: LotSummary) {
        self.detail.apply_summary(summary);
        self.selected_card = 0;
        self.expanded_cards.clear();
        self.notice = None;
    }

    pub fn apply_lot_failed(&mut self, message: &str) {
        self.detail.apply_failure();
        self.set_notice(format!("Load failed: {message}"));
    }

    pub fn apply_search_results(&mut self, items: Vec<LotListItem>) {
        self.search.apply_page(items);
    }

    pub fn apply_search_failed(&mut self, message: &str) {
        self.search.apply_failure();
        self.set_notice(format!("Search failed: {message}"));
    }

    /// Install a freshly fetched QR artifact, releasing any previous handle
    /// before the new one becomes visible.
    pub fn apply_qr_ready(&mut self, artifact: QrArtifact) {
        if let Some(mut old) = self.qr.take() {
            old.release();
        }
        self.qr_loading = false;
        self.qr = Some(artifact);
    }

    pub fn apply_qr_failed(&mut self, message: &str) {
        self.qr_loading = false;
        self.set_notice(format!("QR failed: {message}"));
    }

    pub fn apply_seed_done(&mut self) {
        self.seeding = false;
    }

    pub fn apply_seed_failed(&mut self, message: &str) {
        self.seeding = false;
        self.set_notice(format!("Seed failed: {message}"));
    }

    /// Single teardown routine for every modal dismissal path.
    pub fn close_qr(&mut self) {
        if let Some(mut artifact) = self.qr.take() {
            artifact.release();
        }
    }

    // === keyboard ===

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Action::Quit;
        }

        if self.help_open {
            self.help_open = false;
            return Action::None;
        }

        if self.qr.is_some() {
            return self.handle_qr_modal_key(key);
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                Action::None
            }
            KeyCode::Esc => {
                self.notice = None;
                Action::None
            }
            _ => match self.focus {
                Focus::LotInput => self.handle_lot_input_key(key),
                Focus::SearchInput => self.handle_search_input_key(key),
                Focus::Results => self.handle_results_key(key),
                Focus::Chain => self.handle_chain_key(key),
            },
        }
    }

    fn handle_qr_modal_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => {
                match self.qr.as_ref().map(|a| a.save_copy()) {
                    Some(Ok(path)) => self.set_notice(format!("Saved {}", path.display())),
                    Some(Err(e)) => self.set_notice(format!("Save failed: {e}")),
                    None => {}
                }
                Action::None
            }
            // Any other dismissal path closes the modal and releases the
            // artifact through the one teardown routine.
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.close_qr();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_lot_input_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(c) => {
                self.input.push(c);
                Action::None
            }
            KeyCode::Backspace => {
                self.input.pop();
                Action::None
            }
            KeyCode::Enter => self.request_load(self.input.clone()),
            _ => Action::None,
        }
    }

    fn handle_search_input_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(c) => {
                self.search.query.push(c);
                Action::None
            }
            KeyCode::Backspace => {
                self.search.query.pop();
                Action::None
            }
            KeyCode::Enter => {
                self.search.page = 1;
                self.request_search()
            }
            _ => Action::None,
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.search.select_prev();
                Action::None
            }
            KeyCode::Down => {
                self.search.select_next();
                Action::None
            }
            KeyCode::Left => {
                if self.search.prev_page() {
                    self.request_search()
                } else {
                    Action::None
                }
            }
            KeyCode::Right => {
                if self.search.next_page() {
                    self.request_search()
                } else {
                    Action::None
                }
            }
            // Activating a row loads that lot directly; no second Load step.
            KeyCode::Enter => match self.search.selected_lot_id() {
                Some(lot_id) => {
                    let lot_id = lot_id.to_string();
                    self.input = lot_id.clone();
                    self.request_load(lot_id)
                }
                None => Action::None,
            },
            _ => self.handle_action_key(key),
        }
    }

    fn handle_chain_key(&mut self, key: KeyEvent) -> Action {
        let card_count = self
            .detail
            .view
            .as_ref()
            .map(|v| v.cards.len())
            .unwrap_or(0);

        match key.code {
            KeyCode::Up => {
                self.selected_card = self.selected_card.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                if self.selected_card + 1 < card_count {
                    self.selected_card += 1;
                }
                Action::None
            }
            KeyCode::Enter => {
                if card_count > 0 && !self.expanded_cards.remove(&self.selected_card) {
                    self.expanded_cards.insert(self.selected_card);
                }
                Action::None
            }
            KeyCode::Char('c') => self.copy_selected(|card| card.hash.clone()),
            KeyCode::Char('p') => self.copy_selected(|card| card.prev_hash.clone()),
            _ => self.handle_action_key(key),
        }
    }

    fn copy_selected(
        &mut self,
        pick: impl Fn(&crate::domain::chain::EventCard) -> String,
    ) -> Action {
        match self
            .detail
            .view
            .as_ref()
            .and_then(|v| v.cards.get(self.selected_card))
        {
            Some(card) => Action::Copy(pick(card)),
            None => Action::None,
        }
    }

    /// Keys shared by the non-text-input panes.
    fn handle_action_key(&mut self, key: KeyEvent) -> Action {
        debug_assert!(!self.focus.is_text_input());
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Action::Quit
            }
            KeyCode::Char('?') => {
                self.help_open = true;
                Action::None
            }
            KeyCode::Char('r') => {
                self.search.loading = true;
                Action::Search
            }
            KeyCode::Char('e') => self.request_seed_one(),
            KeyCode::Char('E') => self.request_seed_many(),
            KeyCode::Char('o') => self.request_qr(),
            _ => Action::None,
        }
    }

    // === request constructors (validate, flip affordances, emit actions) ===

    /// Begin a detail load. Empty or whitespace input issues no request.
    pub fn request_load(&mut self, input: String) -> Action {
        match self.detail.begin_load(&input) {
            Some(lot_id) => Action::LoadLot(lot_id),
            None => Action::None,
        }
    }

    fn request_search(&mut self) -> Action {
        self.search.loading = true;
        Action::Search
    }

    fn request_seed_one(&mut self) -> Action {
        if self.seeding {
            return Action::None;
        }
        self.seeding = true;
        Action::SeedOne
    }

    fn request_seed_many(&mut self) -> Action {
        if self.seeding {
            return Action::None;
        }
        self.seeding = true;
        Action::SeedMany
    }

    /// Begin a QR fetch for the currently shown lot. Fails fast with a
    /// visible notice when no lot is selected.
    pub fn request_qr(&mut self) -> Action {
        match self.detail.selected_lot() {
            Some(lot_id) => {
                self.qr_loading = true;
                Action::ShowQr(lot_id.to_string())
            }
            None => {
                self.set_notice("Load a lot before requesting its QR code");
                Action::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn summary(lot_id: &str) -> LotSummary {
        serde_json::from_value(json!({
            "lot_id": lot_id,
            "farm_name": "Green Farm",
            "crop": "Mango",
            "harvest_date": "2024-01-01",
            "total_events": 1,
            "verified": true,
            "chain": [{
                "type": "harvest_created",
                "timestamp": "2024-01-01T08:00:00",
                "payload": {"farm_name": "Green Farm"},
                "hash": "a".repeat(64),
                "prev_hash": "GENESIS",
            }],
        }))
        .unwrap()
    }

    fn list_item(lot_id: &str) -> LotListItem {
        serde_json::from_value(json!({
            "lot_id": lot_id,
            "farm_name": "Green Farm",
            "crop": "Mango",
            "harvest_date": "2024-01-01",
            "total_events": 3,
            "verified": true,
        }))
        .unwrap()
    }

    #[test]
    fn enter_on_empty_lot_input_issues_no_request() {
        let mut app = App::new(10);
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::None);

        app.input = "   ".to_string();
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::None);
        assert!(!app.detail.is_loading());
    }

    #[test]
    fn enter_on_lot_input_loads_trimmed_id() {
        let mut app = App::new(10);
        for c in " LOT-001 ".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            Action::LoadLot("LOT-001".to_string())
        );
        assert!(app.detail.is_loading());
    }

    #[test]
    fn activating_a_result_row_loads_that_lot() {
        let mut app = App::new(10);
        app.apply_search_results(vec![list_item("LOT-001")]);
        app.focus = Focus::Results;

        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            Action::LoadLot("LOT-001".to_string())
        );
        assert_eq!(app.input, "LOT-001");
    }

    #[test]
    fn qr_without_selected_lot_fails_fast_with_notice() {
        let mut app = App::new(10);
        app.focus = Focus::Chain;
        assert_eq!(app.handle_key(key(KeyCode::Char('o'))), Action::None);
        assert!(app.notice.as_deref().unwrap().contains("Load a lot"));
        assert!(!app.qr_loading);
    }

    #[test]
    fn qr_uses_server_echoed_selection() {
        let mut app = App::new(10);
        app.apply_lot_loaded(summary("LOT-001"));
        app.focus = Focus::Chain;
        assert_eq!(
            app.handle_key(key(KeyCode::Char('o'))),
            Action::ShowQr("LOT-001".to_string())
        );
        assert!(app.qr_loading);
    }

    #[test]
    fn qr_replacement_releases_previous_artifact() {
        let mut app = App::new(10);
        let first = QrArtifact::new("LOT-001", "image/png", b"one").unwrap();
        let first_path = first.path().unwrap().to_path_buf();
        app.apply_qr_ready(first);

        let second = QrArtifact::new("LOT-002", "image/png", b"two").unwrap();
        app.apply_qr_ready(second);

        assert!(!first_path.exists());
        assert_eq!(app.qr.as_ref().unwrap().lot_id, "LOT-002");
    }

    #[test]
    fn every_modal_dismissal_path_releases_once() {
        for dismiss in [KeyCode::Esc, KeyCode::Enter, KeyCode::Char('q')] {
            let mut app = App::new(10);
            app.apply_qr_ready(QrArtifact::new("LOT-001", "image/png", b"img").unwrap());
            let path = app.qr.as_ref().unwrap().path().unwrap().to_path_buf();

            app.handle_key(key(dismiss));
            assert!(app.qr.is_none());
            assert!(!path.exists());

            // A second dismissal is a no-op.
            app.close_qr();
            assert!(app.qr.is_none());
        }
    }

    #[test]
    fn failed_load_keeps_previous_view_and_surfaces_notice() {
        let mut app = App::new(10);
        app.apply_lot_loaded(summary("LOT-001"));
        app.request_load("LOT-404".to_string());
        app.apply_lot_failed("not found");

        assert!(app.notice.as_deref().unwrap().contains("not found"));
        assert_eq!(app.detail.selected_lot(), Some("LOT-001"));
        assert_eq!(app.detail.view.as_ref().unwrap().cards.len(), 1);
        assert!(!app.detail.is_loading());
    }

    #[test]
    fn seed_trigger_disabled_while_in_flight_and_reenabled_on_failure() {
        let mut app = App::new(10);
        app.focus = Focus::Results;
        assert_eq!(app.handle_key(key(KeyCode::Char('e'))), Action::SeedOne);
        // Retriggering while in flight does nothing.
        assert_eq!(app.handle_key(key(KeyCode::Char('e'))), Action::None);

        app.apply_seed_failed("boom");
        assert!(!app.seeding);
        assert_eq!(app.handle_key(key(KeyCode::Char('e'))), Action::SeedOne);
    }

    #[test]
    fn chain_expand_toggles_per_card() {
        let mut app = App::new(10);
        app.apply_lot_loaded(summary("LOT-001"));
        app.focus = Focus::Chain;

        app.handle_key(key(KeyCode::Enter));
        assert!(app.expanded_cards.contains(&0));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.expanded_cards.contains(&0));
    }

    #[test]
    fn new_load_resets_chain_scroll_to_top() {
        let mut app = App::new(10);
        app.apply_lot_loaded(summary("LOT-001"));
        app.selected_card = 5;
        app.expanded_cards.insert(3);

        app.apply_lot_loaded(summary("LOT-002"));
        assert_eq!(app.selected_card, 0);
        assert!(app.expanded_cards.is_empty());
    }

    #[test]
    fn copy_emits_the_full_hash_value() {
        let mut app = App::new(10);
        app.apply_lot_loaded(summary("LOT-001"));
        app.focus = Focus::Chain;

        let action = app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(action, Action::Copy("a".repeat(64)));

        let action = app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(action, Action::Copy("GENESIS".to_string()));
    }

    #[test]
    fn copied_label_is_transient() {
        let mut app = App::new(10);
        assert!(!app.copied_label_active());
        app.mark_copied();
        assert!(app.copied_label_active());
    }
}
