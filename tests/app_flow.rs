//! Drives the interactive app through a whole session with a mock source,
//! without a terminal.

use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use userdir::tui::App;
use userdir::{Address, DataSource, FetchError, User};

/// A mock source that returns canned users, or fails.
struct MockSource {
    result: fn() -> Result<Vec<User>, FetchError>,
}

#[async_trait]
impl DataSource for MockSource {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        (self.result)()
    }
}

fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: format!("username{id}"),
        email: format!("user{id}@example.com"),
        address: Address::default(),
        phone: None,
        website: None,
        company: None,
    }
}

fn directory() -> Result<Vec<User>, FetchError> {
    Ok(vec![
        user(1, "Leanne Graham"),
        user(2, "Ervin Howell"),
        user(3, "Clementine Bauch"),
        user(10, "Clementina DuBuque"),
    ])
}

fn broken() -> Result<Vec<User>, FetchError> {
    Err(FetchError::Aborted)
}

async fn settle(app: &mut App) {
    for _ in 0..100 {
        app.process_messages();
        if !app.is_loading() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("fetch never settled");
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    text.chars().for_each(|c| press(app, KeyCode::Char(c)));
}

fn ids(app: &App) -> Vec<i64> {
    app.filtered_users().iter().map(|u| u.id).collect()
}

#[tokio::test]
async fn search_select_and_close_session() {
    let mut app = App::new();
    app.start_fetch(Arc::new(MockSource { result: directory }));
    assert!(app.is_loading());

    settle(&mut app).await;
    assert_eq!(ids(&app), vec![1, 2, 3, 10]);

    type_text(&mut app, "clem");
    assert_eq!(ids(&app), vec![3, 10]);

    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::End);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.selected_user().map(|u| u.name.as_str()), Some("Clementina DuBuque"));

    press(&mut app, KeyCode::Esc);
    assert!(app.selected_user().is_none());
    assert_eq!(app.search.query, "clem");
    assert_eq!(ids(&app), vec![3, 10]);

    app.clear_query();
    assert!(app.search.focused);
    assert_eq!(ids(&app), vec![1, 2, 3, 10]);
}

#[tokio::test]
async fn failed_fetch_is_terminal() {
    let mut app = App::new();
    app.start_fetch(Arc::new(MockSource { result: broken }));
    settle(&mut app).await;

    assert!(app.fetch_error().is_some());
    assert!(app.filtered_users().is_empty());

    // A second start does not refetch
    app.start_fetch(Arc::new(MockSource { result: directory }));
    settle(&mut app).await;
    assert!(app.fetch_error().is_some());
    assert!(app.filtered_users().is_empty());
}
