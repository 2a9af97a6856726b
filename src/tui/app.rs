use crate::filter;
use crate::model::User;
use crate::selection::SelectionState;
use crate::source::{DataSource, FetchOutcome, FetchTask};
use crate::tui::list::ListState;
use crate::tui::search::SearchState;
use crate::tui::ui;
use crate::FetchError;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};
use ratatui::Terminal;
use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Session lifecycle of the user collection.
///
/// Moves forward only: `Idle -> Loading -> Loaded | Failed`.
pub enum LoadState {
    Idle,
    Loading,
    Loaded(Vec<User>),
    Failed(FetchError),
}

/// Screen regions recorded at draw time, used for mouse hit-testing
#[derive(Debug, Default, Clone, Copy)]
pub struct HitAreas {
    pub search: Rect,
    pub clear_button: Rect,
    pub list: Rect,
    pub overlay: Option<Rect>,
    pub close_button: Option<Rect>,
}

pub struct App {
    // Data
    pub load: LoadState,
    pub filtered_indices: Vec<usize>,

    // Sub-states
    pub search: SearchState,
    pub list: ListState,
    pub selection: SelectionState,
    pub hit_areas: HitAreas,

    // Animation counter for the loading spinner
    pub tick: u64,

    fetch: Option<FetchTask>,

    // Quit flag
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            load: LoadState::Idle,
            filtered_indices: Vec::new(),
            search: SearchState::default(),
            list: ListState::default(),
            selection: SelectionState::default(),
            hit_areas: HitAreas::default(),
            tick: 0,
            fetch: None,
            should_quit: false,
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        tick_rate: Duration,
    ) -> crate::Result<()> {
        let mut ticker = tokio::time::interval(tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            self.process_messages();
            terminal.draw(|frame| ui::draw(frame, self))?;

            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            if self.should_quit {
                return Ok(());
            }

            // Yields to the runtime so the fetch task can make progress
            ticker.tick().await;
            self.tick = self.tick.wrapping_add(1);
        }
    }

    /// Kick off the one fetch of the session. No-op once it has started.
    pub fn start_fetch(&mut self, source: Arc<dyn DataSource>) {
        if !matches!(self.load, LoadState::Idle) {
            tracing::debug!("fetch already started, ignoring");
            return;
        }

        tracing::info!("Loading users");
        self.load = LoadState::Loading;
        self.fetch = Some(FetchTask::spawn(source));
    }

    /// Pick up the fetch result once it is ready
    pub fn process_messages(&mut self) {
        let task = match &mut self.fetch {
            Some(task) => task,
            None => return,
        };

        match task.poll() {
            FetchOutcome::Pending => {}
            FetchOutcome::Succeeded(users) => {
                self.fetch = None;
                self.apply_fetch_result(Ok(users));
            }
            FetchOutcome::Failed(e) => {
                self.fetch = None;
                self.apply_fetch_result(Err(e));
            }
        }
    }

    /// Settle the fetch. Only the first result of a session counts.
    pub fn apply_fetch_result(&mut self, result: Result<Vec<User>, FetchError>) {
        if matches!(self.load, LoadState::Loaded(_) | LoadState::Failed(_)) {
            tracing::warn!("fetch already settled, dropping late result");
            return;
        }

        self.load = match result {
            Ok(users) => {
                tracing::info!(count = users.len(), "Loaded users");
                LoadState::Loaded(users)
            }
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "Error fetching users");
                LoadState::Failed(e)
            }
        };
        self.refilter();
    }

    // --- Derived state ---

    /// The full collection; empty unless loaded
    pub fn users(&self) -> &[User] {
        match &self.load {
            LoadState::Loaded(users) => users,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Idle | LoadState::Loading)
    }

    pub fn fetch_error(&self) -> Option<&FetchError> {
        match &self.load {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn filtered_users(&self) -> Vec<&User> {
        let users = self.users();
        self.filtered_indices
            .iter()
            .filter_map(|&idx| users.get(idx))
            .collect()
    }

    /// User shown in the overlay, if any
    pub fn selected_user(&self) -> Option<&User> {
        self.selection.resolve(self.users())
    }

    fn filtered_user_at(&self, row: usize) -> Option<&User> {
        let idx = *self.filtered_indices.get(row)?;
        self.users().get(idx)
    }

    // --- State transitions ---

    fn refilter(&mut self) {
        self.filtered_indices = match &self.load {
            LoadState::Loaded(users) => filter::filter_indices(users, &self.search.query),
            _ => Vec::new(),
        };
        self.list.reset(self.filtered_indices.len());
    }

    /// Clear-query affordance: empty query, full list, focus on the input
    pub fn clear_query(&mut self) {
        self.search.clear();
        self.refilter();
    }

    /// Open the overlay for the highlighted row
    pub fn open_highlighted(&mut self) {
        let user = match self.list.highlighted.and_then(|row| self.filtered_user_at(row)) {
            Some(user) => user.clone(),
            None => return,
        };
        tracing::debug!(id = user.id, "open details");
        self.selection.select(&user);
    }

    pub fn close_details(&mut self) {
        if self.selection.is_open() {
            tracing::debug!("close details");
        }
        self.selection.clear();
    }

    /// Global cancel: innermost thing first
    fn cancel(&mut self) {
        if self.selection.is_open() {
            self.close_details();
        } else if !self.search.query.is_empty() {
            self.clear_query();
        } else if self.search.focused {
            self.search.focused = false;
        } else {
            self.should_quit = true;
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global keys
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('u') if ctrl => {
                self.clear_query();
                return;
            }
            KeyCode::Esc => {
                self.cancel();
                return;
            }
            _ => {}
        }

        if self.search.focused {
            self.handle_search_key(key);
        } else {
            self.handle_list_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.insert(c);
                self.refilter();
            }
            KeyCode::Backspace => {
                if self.search.backspace() {
                    self.refilter();
                }
            }
            KeyCode::Delete => {
                if self.search.delete() {
                    self.refilter();
                }
            }
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.move_home(),
            KeyCode::End => self.search.move_end(),
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.search.focused = false;
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let total = self.filtered_indices.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_prev(total),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_next(total),
            KeyCode::PageUp => self.list.page_up(total),
            KeyCode::PageDown => self.list.page_down(total),
            KeyCode::Home => self.list.select_first(total),
            KeyCode::End => self.list.select_last(total),
            KeyCode::Enter => self.open_highlighted(),

            KeyCode::Char('x') if self.selection.is_open() => self.close_details(),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.search.focused = true;
            }

            // Any other printable char focuses search and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.focused = true;
                self.search.move_end();
                self.search.insert(c);
                self.refilter();
            }

            _ => {}
        }
    }

    // --- Mouse handling ---

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let total = self.filtered_indices.len();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(Position::new(mouse.column, mouse.row));
            }
            MouseEventKind::ScrollDown => self.list.select_next(total),
            MouseEventKind::ScrollUp => self.list.select_prev(total),
            _ => {}
        }
    }

    fn handle_click(&mut self, pos: Position) {
        let areas = self.hit_areas;

        if areas.close_button.is_some_and(|r| r.contains(pos)) {
            self.close_details();
            return;
        }
        // The overlay swallows clicks on its body
        if areas.overlay.is_some_and(|r| r.contains(pos)) {
            return;
        }
        if areas.clear_button.contains(pos) {
            self.clear_query();
            return;
        }
        if areas.search.contains(pos) {
            self.search.focused = true;
            return;
        }
        if areas.list.contains(pos) {
            let row = self.list.scroll_offset + usize::from(pos.y - areas.list.y);
            if self.list.select_row(row, self.filtered_indices.len()) {
                self.search.focused = false;
                self.open_highlighted();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::user;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn names(app: &App) -> Vec<String> {
        app.filtered_users().iter().map(|u| u.name.clone()).collect()
    }

    fn loaded(users: Vec<User>) -> App {
        let mut app = App::new();
        app.apply_fetch_result(Ok(users));
        app
    }

    fn two_users() -> App {
        loaded(vec![user(1, "User 1"), user(2, "User 2")])
    }

    #[test]
    fn starts_idle_with_focused_input() {
        let app = App::new();
        assert!(app.is_loading());
        assert!(app.search.focused);
        assert!(app.filtered_users().is_empty());
        assert!(!app.selection.is_open());
    }

    #[test]
    fn successful_fetch_seeds_filtered_view() {
        let app = two_users();
        assert!(!app.is_loading());
        assert_eq!(names(&app), vec!["User 1", "User 2"]);
        assert_eq!(app.list.highlighted, Some(0));
    }

    #[test]
    fn failed_fetch_shows_no_users_and_ignores_late_result() {
        let mut app = App::new();
        app.apply_fetch_result(Err(FetchError::Aborted));
        assert!(app.fetch_error().is_some());
        assert!(app.filtered_users().is_empty());

        app.apply_fetch_result(Ok(vec![user(1, "User 1")]));
        assert!(app.fetch_error().is_some());
        assert!(app.filtered_users().is_empty());
    }

    #[test]
    fn typing_refilters_on_every_keystroke() {
        let mut app = two_users();

        type_text(&mut app, "User ");
        assert_eq!(names(&app).len(), 2);

        type_text(&mut app, "1");
        assert_eq!(names(&app), vec!["User 1"]);

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(names(&app).len(), 2);

        type_text(&mut app, "9");
        assert!(names(&app).is_empty());
        assert_eq!(app.list.highlighted, None);
    }

    #[test]
    fn query_editing_before_load_does_not_filter() {
        let mut app = App::new();
        type_text(&mut app, "user");
        assert_eq!(app.search.query, "user");
        assert!(app.filtered_users().is_empty());

        app.apply_fetch_result(Ok(vec![user(1, "User 1"), user(2, "Someone")]));
        assert_eq!(names(&app), vec!["User 1"]);
    }

    #[test]
    fn clear_query_restores_list_and_focus() {
        let mut app = two_users();
        type_text(&mut app, "2");
        app.handle_key(key(KeyCode::Tab));
        assert!(!app.search.focused);

        app.handle_key(ctrl('u'));
        assert_eq!(app.search.query, "");
        assert!(app.search.focused);
        assert_eq!(names(&app).len(), 2);
    }

    #[test]
    fn enter_on_list_opens_details_and_esc_closes_them() {
        let mut app = two_users();
        type_text(&mut app, "user");
        app.handle_key(key(KeyCode::Enter)); // input -> list
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.selected_user().map(|u| u.id), Some(2));

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.selection.is_open());
        assert_eq!(app.search.query, "user");
        assert_eq!(names(&app).len(), 2);
    }

    #[test]
    fn selecting_again_replaces_shown_user() {
        let mut app = two_users();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.selection.selected_id(), Some(1));

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.selection.selected_id(), Some(1));

        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.selection.selected_id(), Some(2));

        app.handle_key(key(KeyCode::Char('x')));
        assert!(!app.selection.is_open());
    }

    #[test]
    fn selection_survives_filter_that_excludes_it() {
        let mut app = two_users();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "User 2");

        assert_eq!(names(&app), vec!["User 2"]);
        assert_eq!(app.selected_user().map(|u| u.id), Some(1));
    }

    #[test]
    fn esc_unwinds_overlay_then_query_then_focus_then_quits() {
        let mut app = two_users();
        type_text(&mut app, "1");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.selection.is_open());

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.selection.is_open());
        assert_eq!(app.search.query, "1");

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.search.query, "");
        assert!(app.search.focused);

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.search.focused);
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn printable_key_in_list_jumps_back_to_search() {
        let mut app = two_users();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('2')));
        assert!(app.search.focused);
        assert_eq!(names(&app), vec!["User 2"]);
    }

    #[test]
    fn ctrl_q_quits() {
        let mut app = App::new();
        app.handle_key(ctrl('q'));
        assert!(app.should_quit);
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn clicks_route_to_row_clear_and_close() {
        let mut app = two_users();
        app.hit_areas = HitAreas {
            search: Rect::new(0, 0, 70, 3),
            clear_button: Rect::new(70, 0, 5, 3),
            list: Rect::new(1, 4, 70, 10),
            overlay: None,
            close_button: None,
        };

        click(&mut app, 5, 5);
        assert_eq!(app.selection.selected_id(), Some(2));
        assert!(!app.search.focused);

        app.hit_areas.overlay = Some(Rect::new(20, 4, 30, 8));
        app.hit_areas.close_button = Some(Rect::new(45, 4, 3, 1));
        click(&mut app, 25, 4); // overlay body covers row 0
        assert_eq!(app.selection.selected_id(), Some(2));

        click(&mut app, 46, 4);
        assert!(!app.selection.is_open());

        app.hit_areas.overlay = None;
        app.hit_areas.close_button = None;
        click(&mut app, 1, 1);
        assert!(app.search.focused);
        type_text(&mut app, "User 1");
        click(&mut app, 72, 1);
        assert_eq!(app.search.query, "");
        assert_eq!(names(&app).len(), 2);
    }

    #[test]
    fn click_below_last_row_selects_nothing() {
        let mut app = two_users();
        app.hit_areas.list = Rect::new(1, 4, 70, 10);
        click(&mut app, 5, 9);
        assert!(!app.selection.is_open());
    }
}
