//! Interactive terminal directory

pub mod app;
pub mod colors;
pub mod list;
pub mod search;
pub mod ui;

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::AppConfig;

pub use app::{App, LoadState};

/// Run the interactive directory until the user quits
pub async fn run(config: &AppConfig) -> crate::Result<()> {
    let mut app = App::new();
    match config.http_source() {
        Ok(source) => app.start_fetch(Arc::new(source)),
        Err(e) => app.apply_fetch_result(Err(e)),
    }

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = app.run(&mut terminal, config.tick_rate).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let terminal = execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .and_then(|_| Terminal::new(CrosstermBackend::new(stdout)));
    if terminal.is_err() {
        reset_terminal();
    }
    terminal
}

/// Put the terminal back before the default hook prints the panic, which
/// would otherwise land on the alternate screen in raw mode.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        reset_terminal();
        previous(info);
    }));
}

/// Best-effort restore without a `Terminal` handle
fn reset_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}
